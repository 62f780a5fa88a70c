//! Tests for secret persistence and comparison properties

use cofre_core::storage::{erase_region, ByteStorage, MemoryStorage, SecretStore, ERASED};
use cofre_core::types::{SecretCode, DEFAULT_SECRET, MAX_SECRET_LEN};

#[test]
fn test_compare_matches_only_exact_secret() {
    let store = SecretStore::open(MemoryStorage::with_bytes(b"2468\x00")).unwrap();

    assert!(store.compare("2468"));

    // Same-length permutations
    assert!(!store.compare("2486"));
    assert!(!store.compare("8642"));
    // Proper prefixes and suffixes
    assert!(!store.compare("246"));
    assert!(!store.compare("468"));
    // Extensions
    assert!(!store.compare("24680"));
    assert!(!store.compare(""));
}

#[test]
fn test_compare_across_all_valid_lengths() {
    for secret in ["1234", "12345", "123456"] {
        let mut region = secret.as_bytes().to_vec();
        region.push(0);
        let store = SecretStore::open(MemoryStorage::with_bytes(&region)).unwrap();

        assert!(store.compare(secret), "secret {}", secret);
        // One digit shorter never matches
        assert!(!store.compare(&secret[..secret.len() - 1]));
    }
}

#[test]
fn test_replace_then_load_round_trips() {
    // Given: A store with the default secret
    let mut store = SecretStore::open(MemoryStorage::new()).unwrap();

    // When: The secret is replaced and then reloaded (simulated restart)
    store
        .replace(SecretCode::new("9876".to_string()).unwrap())
        .unwrap();
    store.load().unwrap();

    // Then: The reloaded secret is the replacement
    assert!(store.compare("9876"));
    assert!(!store.compare(DEFAULT_SECRET));
}

#[test]
fn test_uninitialized_storage_seeds_default_once() {
    // Given: An erased region
    let store = SecretStore::open(MemoryStorage::new()).unwrap();
    assert!(store.compare(DEFAULT_SECRET));

    // Seeding wrote the default digits plus the terminator
    let writes_after_seed = store.storage().writes();
    assert_eq!(writes_after_seed, DEFAULT_SECRET.len() + 1);

    // When: The store loads again (second startup)
    let mut store = store;
    store.load().unwrap();

    // Then: The default is still there and no re-seed fired
    assert!(store.compare(DEFAULT_SECRET));
    assert_eq!(store.storage().writes(), writes_after_seed);
}

#[test]
fn test_erased_region_after_reset_reseeds() {
    // Given: A region that has held a custom secret
    let mut store = SecretStore::open(MemoryStorage::new()).unwrap();
    store
        .replace(SecretCode::new("1357".to_string()).unwrap())
        .unwrap();

    // When: The region is erased out-of-band and reloaded
    let mut storage = store.storage().clone();
    erase_region(&mut storage).unwrap();
    let store = SecretStore::open(storage).unwrap();

    // Then: The default secret is back
    assert!(store.compare(DEFAULT_SECRET));
    assert!(!store.compare("1357"));
}

#[test]
fn test_persisted_layout_is_digits_plus_terminator() {
    // The byte region mirrors the code one byte per digit, terminated
    let mut store = SecretStore::open(MemoryStorage::new()).unwrap();
    store
        .replace(SecretCode::new("7890".to_string()).unwrap())
        .unwrap();

    let storage = store.storage();
    assert_eq!(storage.read_byte(0).unwrap(), b'7');
    assert_eq!(storage.read_byte(1).unwrap(), b'8');
    assert_eq!(storage.read_byte(2).unwrap(), b'9');
    assert_eq!(storage.read_byte(3).unwrap(), b'0');
    assert_eq!(storage.read_byte(4).unwrap(), 0x00);
}

#[test]
fn test_overlong_persisted_region_reseeds_default() {
    // A region filled with digits and no terminator inside the window
    // cannot be a valid secret and falls back to the default
    let storage = MemoryStorage::with_bytes(&[b'1'; MAX_SECRET_LEN + 1]);
    let store = SecretStore::open(storage).unwrap();

    assert!(store.compare(DEFAULT_SECRET));
}

#[test]
fn test_erased_sentinel_detected_only_on_first_byte() {
    // Erased bytes after the terminator are normal for short secrets
    let storage = MemoryStorage::with_bytes(&[b'5', b'5', b'5', b'5', 0x00, ERASED, ERASED]);
    let store = SecretStore::open(storage).unwrap();

    assert!(store.compare("5555"));
}

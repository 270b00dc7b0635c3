use varsity_core::{hash_password_with_cost, verify_password};

const TEST_COST: u32 = 4;

#[test]
fn test_hash_password_success() {
    let password = "testpassword123";
    let hash = hash_password_with_cost(password, TEST_COST).unwrap();

    assert!(!hash.is_empty());
    assert_ne!(hash, password);
}

#[test]
fn test_verify_password_correct() {
    let hash = hash_password_with_cost("correctpassword", TEST_COST).unwrap();
    assert!(verify_password("correctpassword", &hash).unwrap());
}

#[test]
fn test_verify_password_incorrect() {
    let hash = hash_password_with_cost("correctpassword", TEST_COST).unwrap();
    assert!(!verify_password("wrongpassword", &hash).unwrap());
}

#[test]
fn test_verify_password_invalid_hash() {
    assert!(verify_password("testpassword", "not_a_valid_bcrypt_hash").is_err());
}

#[test]
fn test_hash_generates_unique_hashes() {
    let hash1 = hash_password_with_cost("samepassword", TEST_COST).unwrap();
    let hash2 = hash_password_with_cost("samepassword", TEST_COST).unwrap();

    assert_ne!(hash1, hash2);
    assert!(verify_password("samepassword", &hash1).unwrap());
    assert!(verify_password("samepassword", &hash2).unwrap());
}

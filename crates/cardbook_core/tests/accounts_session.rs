use cardbook_core::db::{open_db, open_db_in_memory};
use cardbook_core::test_support::ManualClock;
use cardbook_core::{AccountService, AccountType, AuthError, KvRepository, SqliteKvRepository};
use std::sync::Arc;

#[test]
fn register_derives_digits_only_username_and_opens_session() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteKvRepository::try_new(&conn).unwrap();
    let service = AccountService::new(&repo);

    for (phone, expected) in [
        ("+1 (555) 010-2000", "15550102000"),
        ("555.0199", "5550199"),
        ("0044 20 7946 0958", "00442079460958"),
    ] {
        let account = service
            .register(phone, "secret", "Someone", AccountType::Individual)
            .unwrap();
        assert_eq!(account.username, expected);

        let session = service.current_session().unwrap().unwrap();
        assert_eq!(session.id, account.id);
        assert_eq!(session.username, expected);
    }

    assert_eq!(service.list_accounts().unwrap().len(), 3);
}

#[test]
fn duplicate_phone_is_rejected_and_store_is_unchanged() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteKvRepository::try_new(&conn).unwrap();
    let service = AccountService::new(&repo);

    service
        .register("555-0100", "first", "Ada", AccountType::Individual)
        .unwrap();
    let users_before = repo.get_raw("users").unwrap();
    let session_before = repo.get_raw("user").unwrap();

    let err = service
        .register("555-0100", "second", "Impostor", AccountType::Organization)
        .unwrap_err();
    assert!(matches!(err, AuthError::DuplicatePhone(ref phone) if phone == "555-0100"));

    assert_eq!(repo.get_raw("users").unwrap(), users_before);
    assert_eq!(repo.get_raw("user").unwrap(), session_before);
}

#[test]
fn login_requires_exact_phone_and_password() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteKvRepository::try_new(&conn).unwrap();
    let service = AccountService::new(&repo);

    let ada = service
        .register("555-0100", "analytical", "Ada", AccountType::Individual)
        .unwrap();
    service.logout().unwrap();

    for (phone, password) in [
        ("555-0100", "Analytical"),
        ("5550100", "analytical"),
        ("555-0100", ""),
        ("555-0199", "analytical"),
    ] {
        let err = service.login(phone, password).unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
        assert!(service.current_session().unwrap().is_none());
    }

    let logged_in = service.login("555-0100", "analytical").unwrap();
    assert_eq!(logged_in, ada);
    assert_eq!(
        service.current_session().unwrap(),
        Some(ada.session())
    );
}

#[test]
fn session_never_stores_the_password() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteKvRepository::try_new(&conn).unwrap();
    let service = AccountService::new(&repo);

    service
        .register("555-0100", "do-not-leak", "Ada", AccountType::Individual)
        .unwrap();

    let raw_session = repo.get_raw("user").unwrap().unwrap();
    assert!(!raw_session.contains("do-not-leak"));
    let raw_users = repo.get_raw("users").unwrap().unwrap();
    assert!(raw_users.contains("do-not-leak"));
}

#[test]
fn logout_is_idempotent() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteKvRepository::try_new(&conn).unwrap();
    let service = AccountService::new(&repo);

    service.logout().unwrap();
    service
        .register("555-0100", "pw", "Ada", AccountType::Individual)
        .unwrap();
    service.logout().unwrap();
    service.logout().unwrap();
    assert!(service.current_session().unwrap().is_none());
}

#[test]
fn session_is_rehydrated_after_reopening_the_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cardbook.sqlite3");

    let registered = {
        let conn = open_db(&path).unwrap();
        let repo = SqliteKvRepository::try_new(&conn).unwrap();
        AccountService::new(&repo)
            .register("555-0100", "pw", "Acme", AccountType::Organization)
            .unwrap()
    };

    let conn = open_db(&path).unwrap();
    let repo = SqliteKvRepository::try_new(&conn).unwrap();
    let session = AccountService::new(&repo)
        .current_session()
        .unwrap()
        .unwrap();
    assert_eq!(session, registered.session());
    assert_eq!(session.account_type, AccountType::Organization);
}

#[test]
fn stale_session_survives_account_removal() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteKvRepository::try_new(&conn).unwrap();
    let service = AccountService::new(&repo);

    let account = service
        .register("555-0100", "pw", "Ada", AccountType::Individual)
        .unwrap();
    repo.put_raw("users", "[]").unwrap();

    let session = service.current_session().unwrap().unwrap();
    assert_eq!(session.id, account.id);
    assert!(service.find_by_id(&account.id).unwrap().is_none());
}

#[test]
fn ids_are_time_derived_and_unique_within_the_same_millisecond() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteKvRepository::try_new(&conn).unwrap();
    let clock = Arc::new(ManualClock::at_millis(1_700_000_000_000));
    let service = AccountService::with_clock(&repo, clock);

    let first = service
        .register("555-0100", "pw", "Ada", AccountType::Individual)
        .unwrap();
    let second = service
        .register("555-0101", "pw", "Grace", AccountType::Individual)
        .unwrap();

    assert_eq!(first.id, "1700000000000");
    assert_eq!(second.id, "1700000000001");
    assert_eq!(
        service.find_by_username("5550101").unwrap().map(|a| a.name),
        Some("Grace".to_string())
    );
}

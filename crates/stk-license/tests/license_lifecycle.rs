//! Issue, validate, expire and revoke license keys end to end.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use stk_core::{LicenseId, Timestamp};
use stk_license::{
    CheckReason, LicenseCipher, LicenseRegistry, LicenseService, StaticSecrets, SystemLicense,
};

fn service_with_secret(secret: &str) -> LicenseService {
    LicenseService::new(Arc::new(StaticSecrets::new(
        secret,
        "MASTER-KEY",
        "admin-key",
        "issuer-pw",
    )))
    .expect("service builds")
}

fn t0() -> Timestamp {
    Timestamp::from_utc(Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap())
}

#[test]
fn thirty_day_key_expires_after_thirty_days() {
    let svc = service_with_secret("shared-secret");
    let reg = LicenseRegistry::new();
    let key = svc.generate(30, t0()).unwrap();

    let day_29 = svc.validate(&key, &reg, t0().plus_days(29));
    assert!(day_29.is_valid);
    assert_eq!(day_29.reason, CheckReason::Active);
    assert_eq!(day_29.days_remaining(t0().plus_days(29)), 1);

    let day_31 = svc.validate(&key, &reg, t0().plus_days(31));
    assert!(!day_31.is_valid);
    assert_eq!(day_31.reason, CheckReason::Expired);
    assert_eq!(day_31.expiration_date, Some(t0().plus_days(30)));
}

#[test]
fn key_sealed_under_another_secret_is_rejected() {
    let foreign = service_with_secret("other-secret")
        .generate(30, t0())
        .unwrap();
    let check = service_with_secret("shared-secret").validate(
        &foreign,
        &LicenseRegistry::new(),
        t0(),
    );
    assert!(!check.is_valid);
    assert_eq!(check.reason, CheckReason::Undecryptable);
    assert_eq!(check.expiration_date, None);
}

#[test]
fn registered_key_under_another_secret_is_rejected() {
    let foreign = service_with_secret("other-secret")
        .generate(30, t0())
        .unwrap();
    let mut reg = LicenseRegistry::new();
    reg.insert(SystemLicense {
        id: LicenseId::new(),
        key: foreign.clone(),
        client_name: "Imported".into(),
        expiration_date: t0().plus_days(30),
        created_at: t0(),
    });
    assert!(reg.contains_key(&foreign));

    let check = service_with_secret("shared-secret").validate(&foreign, &reg, t0());
    assert!(!check.is_valid);
    assert!(!check.is_admin);
    assert_eq!(check.reason, CheckReason::Undecryptable);
}

#[test]
fn sealed_garbage_payload_is_rejected() {
    let svc = service_with_secret("shared-secret");
    let not_json = LicenseCipher::new("shared-secret")
        .unwrap()
        .seal(b"not a payload")
        .unwrap();
    let check = svc.validate(&not_json, &LicenseRegistry::new(), t0());
    assert_eq!(check.reason, CheckReason::Undecryptable);
}

#[test]
fn revocation_takes_effect_once_registry_is_populated() {
    let svc = service_with_secret("shared-secret");
    let mut reg = LicenseRegistry::new();

    // A key generated outside the registry validates while the registry is empty.
    let loose = svc.generate(10, t0()).unwrap();
    assert!(svc.validate(&loose, &reg, t0()).is_valid);

    let issued = svc.issue(&mut reg, "Corner Shop", 10, t0()).unwrap();
    assert!(svc.validate(&issued.key, &reg, t0()).is_valid);
    assert!(reg.confirm(&issued.key, t0()));

    let loose_check = svc.validate(&loose, &reg, t0());
    assert!(!loose_check.is_valid);
    assert_eq!(loose_check.reason, CheckReason::NotInRegistry);

    // Revoking one record leaves the other in force.
    let other = svc.issue(&mut reg, "Warehouse", 10, t0()).unwrap();
    reg.revoke(issued.id).expect("record exists");
    assert_eq!(
        svc.validate(&issued.key, &reg, t0()).reason,
        CheckReason::NotInRegistry
    );
    assert!(svc.validate(&other.key, &reg, t0()).is_valid);
}

#[test]
fn override_literals_need_no_registry_entry() {
    let svc = service_with_secret("shared-secret");
    let mut reg = LicenseRegistry::new();
    svc.issue(&mut reg, "Someone", 5, t0()).unwrap();

    for key in ["MASTER-KEY", "admin-key"] {
        let check = svc.validate(key, &reg, t0());
        assert!(check.is_admin, "{key}");
        assert_eq!(check.days_remaining(t0()), 36_524);
        assert!(!reg.confirm(key, t0()), "overrides are never registry-confirmed");
    }
}

//! Integration tests for JSON deserialization of the REST types.
//!
//! Each test constructs a realistic JSON fixture in the server's snake_case
//! wire format, deserializes it into the Rust type, and verifies field
//! values, including the null-heavy shapes the API actually produces.

use broker_api::types::*;

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

#[test]
fn test_user_full_profile() {
    let json = r#"{
        "id": 7,
        "email": "ana@example.com",
        "is_admin": false,
        "status": "pending",
        "full_name": "Ana Souza",
        "date_of_birth": "1990-04-12",
        "gender": "female",
        "nationality": "Brazilian",
        "naturalness": "Recife",
        "cpf": "123.456.789-00",
        "rg_cnh_front": "/uploads/7/rg_front.jpg",
        "rg_cnh_back": "/uploads/7/rg_back.jpg",
        "selfie_with_doc": "/uploads/7/selfie.jpg",
        "proof_of_residence": "/uploads/7/residence.pdf",
        "occupation": "engineer",
        "company_name": "Acme Ltda",
        "monthly_income": 12500.0,
        "estimated_wealth": 300000.0,
        "source_of_income": "salary",
        "licit_resources_declaration": true,
        "bank_name": "Banco Azul",
        "bank_agency": "0001",
        "bank_account": "12345-6",
        "account_type": "current",
        "account_ownership": "own",
        "investment_objective": "long",
        "risk_tolerance": "medium",
        "investment_knowledge": "beginner",
        "investment_types": "stocks,funds",
        "terms_of_use_accepted": true,
        "privacy_policy_accepted": true,
        "lgpd_accepted": true,
        "marketing_consent": false
    }"#;

    let user: User = serde_json::from_str(json).unwrap();
    assert_eq!(user.id, 7);
    assert_eq!(user.email, "ana@example.com");
    assert!(!user.is_admin);
    assert_eq!(user.status, RecordStatus::Pending);
    assert_eq!(user.full_name.as_deref(), Some("Ana Souza"));
    assert_eq!(user.cpf.as_deref(), Some("123.456.789-00"));
    assert_eq!(user.monthly_income, Some(12500.0));
    assert!(user.licit_resources_declaration);
    assert_eq!(user.account_type.as_deref(), Some("current"));
    assert_eq!(user.investment_types.as_deref(), Some("stocks,funds"));
    assert!(user.terms_of_use_accepted);
    assert!(!user.marketing_consent);
}

#[test]
fn test_user_minimal_profile() {
    // A bare registration: everything optional is null.
    let json = r#"{
        "id": 3,
        "email": "bare@example.com",
        "is_admin": false,
        "status": "rejected",
        "full_name": null,
        "date_of_birth": null,
        "gender": null,
        "nationality": null,
        "naturalness": null,
        "cpf": null,
        "rg_cnh_front": null,
        "rg_cnh_back": null,
        "selfie_with_doc": null,
        "proof_of_residence": null,
        "occupation": null,
        "company_name": null,
        "monthly_income": null,
        "estimated_wealth": null,
        "source_of_income": null,
        "licit_resources_declaration": false,
        "bank_name": null,
        "bank_agency": null,
        "bank_account": null,
        "account_type": null,
        "account_ownership": null,
        "investment_objective": null,
        "risk_tolerance": null,
        "investment_knowledge": null,
        "investment_types": null,
        "terms_of_use_accepted": false,
        "privacy_policy_accepted": false,
        "lgpd_accepted": false,
        "marketing_consent": false
    }"#;

    let user: User = serde_json::from_str(json).unwrap();
    assert_eq!(user.status, RecordStatus::Rejected);
    assert!(user.full_name.is_none());
    assert!(user.monthly_income.is_none());
    assert!(!user.licit_resources_declaration);
}

// ---------------------------------------------------------------------------
// Transaction
// ---------------------------------------------------------------------------

#[test]
fn test_transaction_pending() {
    let json = r#"{
        "id": 42,
        "user_id": 7,
        "type": "deposit",
        "amount": 100.0,
        "status": "pending",
        "request_date": "2025-03-01T14:22:05.123456",
        "approval_date": null
    }"#;

    let tx: Transaction = serde_json::from_str(json).unwrap();
    assert_eq!(tx.id, 42);
    assert_eq!(tx.user_id, 7);
    assert_eq!(tx.kind, TransactionKind::Deposit);
    assert_eq!(tx.amount, 100.0);
    assert_eq!(tx.status, RecordStatus::Pending);
    assert!(tx.request_date.is_some());
    assert!(tx.approval_date.is_none());
}

#[test]
fn test_transaction_reviewed_withdrawal() {
    let json = r#"{
        "id": 43,
        "user_id": 9,
        "type": "withdrawal",
        "amount": 250.5,
        "status": "approved",
        "request_date": "2025-03-01T14:22:05",
        "approval_date": "2025-03-02T09:10:00"
    }"#;

    let tx: Transaction = serde_json::from_str(json).unwrap();
    assert_eq!(tx.kind, TransactionKind::Withdrawal);
    assert_eq!(tx.status, RecordStatus::Approved);
    assert_eq!(tx.approval_date.as_deref(), Some("2025-03-02T09:10:00"));
}

// ---------------------------------------------------------------------------
// AuthStatus / SessionUser
// ---------------------------------------------------------------------------

#[test]
fn test_auth_status_admin_session() {
    let json = r#"{
        "authenticated": true,
        "user": {"email": "admin@admin.com", "is_admin": true}
    }"#;

    let auth: AuthStatus = serde_json::from_str(json).unwrap();
    assert!(auth.authenticated);
    assert!(auth.is_admin());
    assert_eq!(
        auth.user.as_ref().and_then(|u| u.email.as_deref()),
        Some("admin@admin.com")
    );
}

#[test]
fn test_auth_status_regular_session_full_profile() {
    // For regular users the server embeds the full profile; unknown fields
    // must be ignored and is_admin defaults to false when absent.
    let json = r#"{
        "authenticated": true,
        "user": {"id": 7, "email": "ana@example.com", "status": "approved"}
    }"#;

    let auth: AuthStatus = serde_json::from_str(json).unwrap();
    assert!(auth.authenticated);
    assert!(!auth.is_admin());
}

#[test]
fn test_auth_status_no_session() {
    let json = r#"{"authenticated": false}"#;

    let auth: AuthStatus = serde_json::from_str(json).unwrap();
    assert!(!auth.authenticated);
    assert!(auth.user.is_none());
    assert!(!auth.is_admin());
}

// ---------------------------------------------------------------------------
// ApiAck / LoginResponse
// ---------------------------------------------------------------------------

#[test]
fn test_api_ack() {
    let json = r#"{"success": true, "message": "user approved"}"#;

    let ack: ApiAck = serde_json::from_str(json).unwrap();
    assert!(ack.success);
    assert_eq!(ack.message.as_deref(), Some("user approved"));

    let bare: ApiAck = serde_json::from_str(r#"{"success": false}"#).unwrap();
    assert!(!bare.success);
    assert!(bare.message.is_none());
}

#[test]
fn test_login_response() {
    let json = r#"{
        "success": true,
        "message": "login ok",
        "user": {"email": "admin@admin.com", "is_admin": true}
    }"#;

    let resp: LoginResponse = serde_json::from_str(json).unwrap();
    assert!(resp.success);
    assert!(resp.user.as_ref().is_some_and(|u| u.is_admin));
}

// ---------------------------------------------------------------------------
// Enum serialization
// ---------------------------------------------------------------------------

#[test]
fn test_record_status_serde() {
    assert_eq!(
        serde_json::to_string(&RecordStatus::Pending).unwrap(),
        "\"pending\""
    );
    assert_eq!(
        serde_json::from_str::<RecordStatus>("\"approved\"").unwrap(),
        RecordStatus::Approved
    );
    assert_eq!(
        serde_json::from_str::<RecordStatus>("\"rejected\"").unwrap(),
        RecordStatus::Rejected
    );
}

#[test]
fn test_transaction_kind_serde() {
    assert_eq!(
        serde_json::to_string(&TransactionKind::Deposit).unwrap(),
        "\"deposit\""
    );
    // The server's wire value for outgoing requests.
    assert_eq!(
        serde_json::to_string(&TransactionKind::Withdrawal).unwrap(),
        "\"withdrawal\""
    );
}

#[test]
fn test_transaction_kind_from_str_accepts_both_spellings() {
    assert_eq!(
        "withdraw".parse::<TransactionKind>().unwrap(),
        TransactionKind::Withdrawal
    );
    assert_eq!(
        "withdrawal".parse::<TransactionKind>().unwrap(),
        TransactionKind::Withdrawal
    );
    assert!("transfer".parse::<TransactionKind>().is_err());
}

#[test]
fn test_review_action_path_segment() {
    assert_eq!(ReviewAction::Approve.to_string(), "approve");
    assert_eq!(ReviewAction::Reject.to_string(), "reject");
}

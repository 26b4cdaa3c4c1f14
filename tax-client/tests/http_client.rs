//! Exercises `HttpProfileClient` against a local mock of the tax service.

use mockito::{Matcher, Server};
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use tax_client::{ClientConfig, ClientError, FetchOutcome, HttpProfileClient, ProfileService};
use tax_core::{EmailAddress, Profile, SaveProfileRequest};

const PROFILE_JSON: &str = r#"{
    "profile": {"age_group": "below_60", "resident_status": "resident"},
    "income": {
        "salary": {"salary_total": 1200000.0, "salary_basic": 600000.0, "salary_hra": 240000.0},
        "house_property": {"hp_rent_received": 0.0, "hp_municipal_taxes": 0.0},
        "capital_gains": 0.0, "business_profession": 0.0,
        "other_sources": 12000.0, "other_sources_interest_savings": 8000.0
    },
    "deductions": {
        "hra_details": {"rent_paid": 180000.0, "is_metro": true},
        "section_80c": 100000.0, "section_80ccd_1b": 0.0,
        "section_80d_self": 25000.0, "self_above_60": false,
        "section_80d_parents": 0.0, "parents_above_60": false,
        "section_24b": 0.0, "section_80e": 0.0, "section_80g": 0.0,
        "section_80u": "none", "section_80dd": "none"
    }
}"#;

const RESULT_JSON: &str = r#"{
    "summary": "Based on your inputs, you can save an additional **₹15,600** per year!",
    "currentTax": {"gti": 1212000, "taxable_income": 1012000, "total_tax": 119184},
    "potentialTax": {"gti": 1212000, "taxable_income": 912000, "total_tax": 103584},
    "potentialSavings": 15600,
    "savingsBreakdown": [
        {"name": "Investments (PPF, EPF, etc.)", "user_amount": 100000, "advised_amount": 150000}
    ],
    "advice": {"taxSavingAdvice": [], "wellnessAdvice": []}
}"#;

fn email() -> EmailAddress {
    EmailAddress::parse("a@b.co").unwrap()
}

fn client_for(server: &Server) -> HttpProfileClient {
    HttpProfileClient::new(&ClientConfig::default().with_base_url(server.url())).unwrap()
}

#[tokio::test]
async fn fetch_profile_found() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/profile/a@b.co")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(PROFILE_JSON)
        .create_async()
        .await;

    let outcome = client_for(&server).fetch_profile(&email()).await.unwrap();

    mock.assert_async().await;
    let FetchOutcome::Found(profile) = outcome else {
        panic!("expected a profile, got {outcome:?}");
    };
    assert_eq!(profile.income.salary.salary_total, dec!(1200000));
    assert_eq!(profile.deductions.section_80c, dec!(100000));
    assert!(profile.deductions.hra_details.is_metro);
}

#[tokio::test]
async fn fetch_profile_404_is_not_found() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/profile/a@b.co")
        .with_status(404)
        .with_body(r#"{"detail": "Profile not found for this email."}"#)
        .create_async()
        .await;

    let outcome = client_for(&server).fetch_profile(&email()).await.unwrap();

    mock.assert_async().await;
    assert_eq!(outcome, FetchOutcome::NotFound);
}

#[tokio::test]
async fn fetch_profile_other_status_is_error() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/profile/a@b.co")
        .with_status(503)
        .create_async()
        .await;

    let err = client_for(&server).fetch_profile(&email()).await.unwrap_err();

    mock.assert_async().await;
    assert_eq!(err.status(), Some(503));
    assert!(!err.is_connectivity());
}

#[tokio::test]
async fn fetch_profile_malformed_body_is_decode_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/profile/a@b.co")
        .with_status(200)
        .with_body("<html>oops</html>")
        .create_async()
        .await;

    let err = client_for(&server).fetch_profile(&email()).await.unwrap_err();

    assert!(matches!(err, ClientError::Decode { what: "profile", .. }));
}

#[tokio::test]
async fn save_profile_posts_email_and_profile_data() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/profile")
        .match_header("content-type", "application/json")
        .match_body(Matcher::PartialJsonString(
            r#"{"email": "a@b.co", "profile_data": {"deductions": {"section_80c": 150000.0, "section_80g": 0.0}}}"#
                .to_string(),
        ))
        .with_status(201)
        .with_body(r#"{"id": 7, "email": "a@b.co"}"#)
        .create_async()
        .await;

    let mut profile = Profile::default();
    profile.deductions.section_80c = dec!(150000);
    let request = SaveProfileRequest::new(email(), profile);

    let ack = client_for(&server).save_profile(&request).await.unwrap();

    mock.assert_async().await;
    assert_eq!(ack.status, 201);
    assert_eq!(ack.user_id, Some(7));
}

#[tokio::test]
async fn save_profile_rejection_carries_status() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/profile")
        .with_status(500)
        .create_async()
        .await;

    let request = SaveProfileRequest::new(email(), Profile::default());
    let err = client_for(&server).save_profile(&request).await.unwrap_err();

    assert_eq!(err.to_string(), "Failed to save profile (500)");
}

#[tokio::test]
async fn request_calculation_parses_result() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/calculate/a@b.co")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(RESULT_JSON)
        .create_async()
        .await;

    let result = client_for(&server).request_calculation(&email()).await.unwrap();

    mock.assert_async().await;
    assert_eq!(result.potential_savings, dec!(15600));
    assert_eq!(result.current_tax.total_tax, dec!(119184));
    assert_eq!(result.savings_breakdown[0].advised_amount, dec!(150000));
}

#[tokio::test]
async fn save_and_calculate_runs_in_order() {
    let mut server = Server::new_async().await;
    let save = server
        .mock("POST", "/profile")
        .with_status(201)
        .with_body(r#"{"id": 1, "email": "a@b.co"}"#)
        .create_async()
        .await;
    let calculate = server
        .mock("POST", "/calculate/a@b.co")
        .with_status(200)
        .with_body(RESULT_JSON)
        .create_async()
        .await;

    let request = SaveProfileRequest::new(email(), Profile::default());
    let result = client_for(&server).save_and_calculate(&request).await.unwrap();

    save.assert_async().await;
    calculate.assert_async().await;
    assert_eq!(result.potential_tax.total_tax, dec!(103584));
}

#[tokio::test]
async fn failed_save_skips_calculation() {
    let mut server = Server::new_async().await;
    let save = server
        .mock("POST", "/profile")
        .with_status(422)
        .create_async()
        .await;
    let calculate = server
        .mock("POST", "/calculate/a@b.co")
        .expect(0)
        .create_async()
        .await;

    let request = SaveProfileRequest::new(email(), Profile::default());
    let err = client_for(&server).save_and_calculate(&request).await.unwrap_err();

    save.assert_async().await;
    calculate.assert_async().await;
    assert_eq!(err.status(), Some(422));
}

#[tokio::test]
async fn calculation_failure_after_save_carries_status() {
    let mut server = Server::new_async().await;
    let _save = server
        .mock("POST", "/profile")
        .with_status(201)
        .create_async()
        .await;
    let _calculate = server
        .mock("POST", "/calculate/a@b.co")
        .with_status(500)
        .create_async()
        .await;

    let request = SaveProfileRequest::new(email(), Profile::default());
    let err = client_for(&server).save_and_calculate(&request).await.unwrap_err();

    assert!(err.to_string().contains("500"));
    assert!(matches!(err, ClientError::CalculationFailed { status: 500 }));
}

#[tokio::test]
async fn unreachable_server_is_connectivity_error() {
    // Port 1 is reserved and never listening on test hosts.
    let client =
        HttpProfileClient::new(&ClientConfig::default().with_base_url("http://127.0.0.1:1")).unwrap();

    let err = client.fetch_profile(&email()).await.unwrap_err();

    assert!(err.is_connectivity());
}

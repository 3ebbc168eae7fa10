//! Login wizard tests against the simulated booking service.
//!
//! Time is paused so the fixed 2000ms / 1500ms delays resolve instantly.

use coolie_connect::notify::drain;
use coolie_connect::{
    FlowConfig, FlowError, LoginPage, LoginStep, Notifier, Route, SimulatedBookingService,
    UserType, ValidationError,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast::Receiver;

fn login_page() -> (LoginPage, Receiver<coolie_connect::Notification>) {
    let notifier = Notifier::default();
    let rx = notifier.subscribe();
    let page = LoginPage::new(
        Arc::new(SimulatedBookingService::default()),
        notifier,
        &FlowConfig::default(),
    );
    (page, rx)
}

async fn page_at_otp_step(user_type: UserType) -> (LoginPage, Receiver<coolie_connect::Notification>) {
    let (mut page, rx) = login_page();
    page.select_user_type(user_type).unwrap();
    page.set_phone_number("+91 9876543210").unwrap();
    page.set_pnr_number("1234567890").unwrap();
    page.send_otp().await.unwrap();
    (page, rx)
}

#[tokio::test]
async fn test_type_selection_required_to_leave_first_step() {
    let (mut page, _rx) = login_page();

    let result = page.proceed();
    assert!(matches!(
        result,
        Err(FlowError::Validation(ValidationError::NoUserType))
    ));
    assert_eq!(page.step(), LoginStep::SelectType);

    for user_type in UserType::ALL {
        let (mut page, _rx) = login_page();
        page.select_user_type(user_type).unwrap();
        assert_eq!(page.step(), LoginStep::EnterDetails);
        assert_eq!(page.draft().user_type, Some(user_type));
    }
}

#[tokio::test(start_paused = true)]
async fn test_empty_phone_never_reaches_otp_step() {
    for user_type in UserType::ALL {
        let (mut page, mut rx) = login_page();
        page.select_user_type(user_type).unwrap();
        page.set_pnr_number("1234567890").unwrap();

        let result = page.send_otp().await;
        assert!(matches!(
            result,
            Err(FlowError::Validation(ValidationError::MissingFields))
        ));
        assert_eq!(page.step(), LoginStep::EnterDetails);

        let received = drain(&mut rx);
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].title, "Missing Information");
    }
}

#[tokio::test(start_paused = true)]
async fn test_passenger_needs_pnr_but_porter_does_not() {
    let (mut passenger, _rx) = login_page();
    passenger.select_user_type(UserType::Passenger).unwrap();
    passenger.set_phone_number("+91 9876543210").unwrap();
    assert!(passenger.send_otp().await.is_err());
    assert_eq!(passenger.step(), LoginStep::EnterDetails);

    let (mut porter, _rx) = login_page();
    porter.select_user_type(UserType::Porter).unwrap();
    porter.set_phone_number("+91 9876543210").unwrap();
    porter.send_otp().await.unwrap();
    assert_eq!(porter.step(), LoginStep::VerifyOtp);
}

#[tokio::test(start_paused = true)]
async fn test_otp_dispatch_waits_for_simulated_delay() {
    let (mut page, mut rx) = login_page();
    page.select_user_type(UserType::Porter).unwrap();
    page.set_phone_number("+91 9876543210").unwrap();

    let started = tokio::time::Instant::now();
    page.send_otp().await.unwrap();
    assert!(started.elapsed() >= Duration::from_millis(2000));

    let received = drain(&mut rx);
    assert_eq!(received[0].title, "OTP Sent");
    assert_eq!(received[0].description, "Verification code sent to +91 9876543210");
}

#[tokio::test(start_paused = true)]
async fn test_typed_code_redirects_passenger_once() {
    let (mut page, mut rx) = page_at_otp_step(UserType::Passenger).await;
    drain(&mut rx);

    let mut redirects = Vec::new();
    for (index, digit) in "482913".chars().enumerate() {
        if let Some(route) = page.type_otp(index, &digit.to_string()).await.unwrap() {
            redirects.push(route);
        }
    }

    assert_eq!(redirects, vec![Route::PassengerDashboard]);
    assert_eq!(page.step(), LoginStep::SignedIn);
    assert_eq!(page.redirect(), Some(Route::PassengerDashboard));

    let received = drain(&mut rx);
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].title, "Login Successful");
    assert_eq!(received[0].description, "Welcome back, passenger!");
}

#[tokio::test(start_paused = true)]
async fn test_pasted_code_redirects_porter() {
    let (mut page, _rx) = page_at_otp_step(UserType::Porter).await;

    let started = tokio::time::Instant::now();
    let route = page.paste_otp("123456").await.unwrap();
    assert!(started.elapsed() >= Duration::from_millis(1500));
    assert_eq!(route, Some(Route::CoolieDashboard));
    assert_eq!(page.draft().phone_number, "", "draft is discarded after sign-in");
}

#[tokio::test(start_paused = true)]
async fn test_partial_paste_fills_only_digit_offsets() {
    let (mut page, _rx) = page_at_otp_step(UserType::Porter).await;

    assert_eq!(page.paste_otp("1a3b5c").await.unwrap(), None);
    assert_eq!(
        page.otp().cells(),
        &[Some('1'), None, Some('3'), None, Some('5'), None]
    );
    assert_eq!(page.step(), LoginStep::VerifyOtp);

    assert_eq!(page.type_otp(1, "2").await.unwrap(), None);
    assert_eq!(page.type_otp(3, "4").await.unwrap(), None);
    assert_eq!(
        page.type_otp(5, "6").await.unwrap(),
        Some(Route::CoolieDashboard)
    );
}

#[tokio::test(start_paused = true)]
async fn test_back_navigation() {
    let (mut page, _rx) = page_at_otp_step(UserType::Passenger).await;

    assert_eq!(page.back(), LoginStep::EnterDetails);
    assert_eq!(page.draft().user_type, Some(UserType::Passenger));
    assert_eq!(page.draft().phone_number, "+91 9876543210");

    assert_eq!(page.back(), LoginStep::SelectType);
    assert_eq!(page.draft().user_type, None);

    assert_eq!(page.back(), LoginStep::SelectType);
}

#[tokio::test(start_paused = true)]
async fn test_resend_stays_on_verification_and_clears_cells() {
    let (mut page, mut rx) = page_at_otp_step(UserType::Porter).await;
    page.type_otp(0, "9").await.unwrap();
    drain(&mut rx);

    page.resend_otp().await.unwrap();
    assert_eq!(page.step(), LoginStep::VerifyOtp);
    assert!(page.otp().is_empty());
    assert_eq!(drain(&mut rx)[0].title, "OTP Sent");
}

#[tokio::test(start_paused = true)]
async fn test_teardown_during_dispatch_discards_completion() {
    let (mut page, mut rx) = login_page();
    page.select_user_type(UserType::Porter).unwrap();
    page.set_phone_number("+91 9876543210").unwrap();
    let handle = page.scope_handle();

    let task = tokio::spawn(async move {
        let result = page.send_otp().await;
        (page, result)
    });

    tokio::time::sleep(Duration::from_millis(500)).await;
    handle.teardown();
    let (page, result) = task.await.unwrap();

    assert!(matches!(result, Err(FlowError::Cancelled)));
    assert_eq!(page.step(), LoginStep::EnterDetails);

    // Run past the dispatch deadline; nothing arrives late.
    tokio::time::sleep(Duration::from_millis(5000)).await;
    assert_eq!(page.step(), LoginStep::EnterDetails);
    assert!(drain(&mut rx).is_empty());
}

//! Registration scenarios.

use sonda_application::fixtures::{self, REGISTER_PATH};
use sonda_domain::RequestSpec;
use sonda_e2e::TestContext;
use sonda_e2e::assertions::{assert_body, assert_json_has_key, assert_status};

#[tokio::test]
async fn create_user_successfully() {
    let ctx = TestContext::start().await;
    let data = fixtures::registration_data();

    let response = ctx
        .send(&RequestSpec::post(REGISTER_PATH).with_form(data.form()))
        .await;

    assert_status(&response, 200);
    assert_json_has_key(&response, "id");
}

#[tokio::test]
async fn create_user_with_existing_email() {
    let ctx = TestContext::start().await;
    let email = "vinkotov@example.com";
    let data = fixtures::registration_data_with_email(email);

    let response = ctx
        .send(&RequestSpec::post(REGISTER_PATH).with_form(data.form()))
        .await;

    assert_status(&response, 400);
    assert_body(&response, &format!("Users with email '{email}' already exists"));
}

#[tokio::test]
async fn create_user_with_invalid_email() {
    let ctx = TestContext::start().await;
    let data = fixtures::registration_data_with_email("with_no_at_sign_example.com");

    let response = ctx
        .send(&RequestSpec::post(REGISTER_PATH).with_form(data.form()))
        .await;

    assert_status(&response, 400);
    assert_body(&response, "Invalid email format");
}

#[tokio::test]
async fn create_user_with_short_first_name() {
    let ctx = TestContext::start().await;
    let mut data = fixtures::registration_data();
    data.first_name = fixtures::random_string(1);

    let response = ctx
        .send(&RequestSpec::post(REGISTER_PATH).with_form(data.form()))
        .await;

    assert_status(&response, 400);
    assert_body(&response, "The value of 'firstName' field is too short");
}

#[tokio::test]
async fn create_user_with_boundary_first_name() {
    let ctx = TestContext::start().await;
    let mut data = fixtures::registration_data();
    data.first_name = fixtures::random_string(250);

    let response = ctx
        .send(&RequestSpec::post(REGISTER_PATH).with_form(data.form()))
        .await;

    assert_status(&response, 200);
    assert_json_has_key(&response, "id");
}

#[tokio::test]
async fn create_user_with_long_first_name() {
    let ctx = TestContext::start().await;
    let mut data = fixtures::registration_data();
    data.first_name = fixtures::random_string(251);

    let response = ctx
        .send(&RequestSpec::post(REGISTER_PATH).with_form(data.form()))
        .await;

    assert_status(&response, 400);
    assert_body(&response, "The value of 'firstName' field is too long");
}

#[tokio::test]
async fn create_user_without_one_field() {
    let ctx = TestContext::start().await;

    for field in ["password", "username", "firstName", "lastName", "email"] {
        let form = fixtures::registration_data().form().without(field);

        let response = ctx
            .send(&RequestSpec::post(REGISTER_PATH).with_form(form))
            .await;

        assert_status(&response, 400);
        assert_body(
            &response,
            &format!("The following required params are missed: {field}"),
        );
    }
}

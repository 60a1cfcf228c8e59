//! User details scenarios.
//!
//! Only the owner of an account sees its full fields; everyone else sees
//! the username alone.

use sonda_application::fixtures;
use sonda_domain::RequestSpec;
use sonda_e2e::TestContext;
use sonda_e2e::assertions::{
    assert_json_has_key, assert_json_has_keys, assert_json_lacks_key, assert_status,
};

#[tokio::test]
async fn get_user_details_unauthenticated() {
    let ctx = TestContext::start().await;

    let response = ctx.send(&RequestSpec::get("/user/2")).await;

    assert_json_has_key(&response, "username");
    assert_json_lacks_key(&response, "email");
    assert_json_lacks_key(&response, "firstName");
    assert_json_lacks_key(&response, "lastName");
}

#[tokio::test]
async fn get_own_user_details() {
    let ctx = TestContext::start().await;
    let session = ctx.create_user_and_auth().await;

    let response = ctx
        .send(&RequestSpec::get(format!("/user/{}", session.user_id)).with_auth(&session))
        .await;

    assert_status(&response, 200);
    assert_json_has_keys(&response, &["username", "email", "firstName", "lastName"]);
}

#[tokio::test]
async fn get_user_details_as_another_user() {
    let ctx = TestContext::start().await;
    let session = ctx.create_user_and_auth().await;
    let other_id = ctx.register(&fixtures::registration_data()).await;

    let response = ctx
        .send(&RequestSpec::get(format!("/user/{other_id}")).with_auth(&session))
        .await;

    assert_json_has_key(&response, "username");
    assert_json_lacks_key(&response, "email");
    assert_json_lacks_key(&response, "firstName");
    assert_json_lacks_key(&response, "lastName");
}

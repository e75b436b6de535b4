//! Steps shared by every HTTP behaviour suite.

use rstest_bdd_macros::{given, then};

use crate::harness::{WorldFixture, create_named_meal, last_response, register};

fn parse_diet_flag(kind: &str) -> bool {
    match kind {
        "on-diet" => true,
        "off-diet" => false,
        other => panic!("unknown meal kind {other}; expected on-diet or off-diet"),
    }
}

#[given("{user} is registered")]
fn user_is_registered(world: &WorldFixture, user: String) {
    let response = register(&world.world(), &user);
    assert_eq!(response.status, 201, "register {user}");
}

#[given("{user} has recorded an {kind} meal named {name}")]
fn user_has_recorded_a_meal(world: &WorldFixture, user: String, kind: String, name: String) {
    create_named_meal(&world.world(), &user, &name, parse_diet_flag(&kind));
}

#[then("the response status is {status}")]
fn the_response_status_is(world: &WorldFixture, status: u16) {
    let response = last_response(&world.world());
    assert_eq!(response.status, status, "body: {}", response.body);
}

use trainerdex::{connector::retry::RetryPolicy, Client, HttpConnector};
use trainerdex_test_utils::prelude::*;

mod leaderboard;
mod social_connection;
mod trainer;
mod user;

fn client(test: &TestSetup) -> Client {
    Client::new(
        test.connector::<HttpConnector>()
            .with_retry(RetryPolicy::none()),
    )
}

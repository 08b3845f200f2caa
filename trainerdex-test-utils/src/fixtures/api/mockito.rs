//! V1 HTTP mock endpoint creation utilities.
//!
//! Each endpoint is registered with the mockito server under the `/api/v1` prefix and
//! verifies it was called the expected number of times.

use mockito::{Matcher, Mock};
use serde_json::Value;

use crate::{constant::API_PREFIX, fixtures::api::ApiFixtures};

impl<'a> ApiFixtures<'a> {
    /// Create a mock endpoint answering `method path` with a JSON body.
    ///
    /// # Arguments
    /// - `method` - HTTP method to match
    /// - `path` - Route below `/api/v1`, e.g. `/trainers/1/`
    /// - `status` - Status code to answer with
    /// - `body` - JSON body to answer with
    /// - `expected_requests` - Number of times this endpoint should be called
    ///
    /// # Returns
    /// - `Mock` - The created mock endpoint
    pub fn create_endpoint(
        &mut self,
        method: &str,
        path: &str,
        status: usize,
        body: &Value,
        expected_requests: usize,
    ) -> Mock {
        let url = format!("{API_PREFIX}{path}");

        self.setup
            .server
            .mock(method, url.as_str())
            .match_query(Matcher::Any)
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .expect(expected_requests)
            .create()
    }

    /// Create a mock GET endpoint at `/trainers/{trainer_id}/`.
    pub fn create_trainer_endpoint(
        &mut self,
        trainer_id: i64,
        trainer: &Value,
        expected_requests: usize,
    ) -> Mock {
        let path = format!("/trainers/{trainer_id}/");
        self.create_endpoint("GET", &path, 200, trainer, expected_requests)
    }

    /// Create a mock PATCH endpoint at `/trainers/{trainer_id}/` that expects `partial`
    /// to be part of the request body.
    pub fn create_edit_trainer_endpoint(
        &mut self,
        trainer_id: i64,
        partial: Value,
        response: &Value,
        expected_requests: usize,
    ) -> Mock {
        let url = format!("{API_PREFIX}/trainers/{trainer_id}/");

        self.setup
            .server
            .mock("PATCH", url.as_str())
            .match_header("authorization", Matcher::Regex("^Token .+".to_string()))
            .match_body(Matcher::PartialJson(partial))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(response.to_string())
            .expect(expected_requests)
            .create()
    }

    /// Create a mock GET endpoint at `/trainers/{trainer_id}/updates/`.
    pub fn create_updates_endpoint(
        &mut self,
        trainer_id: i64,
        updates: &[Value],
        expected_requests: usize,
    ) -> Mock {
        let path = format!("/trainers/{trainer_id}/updates/");
        let body = Value::Array(updates.to_vec());
        self.create_endpoint("GET", &path, 200, &body, expected_requests)
    }

    /// Create a mock POST endpoint at `/trainers/{trainer_id}/updates/` that expects
    /// `partial` to be part of the request body.
    pub fn create_post_update_endpoint(
        &mut self,
        trainer_id: i64,
        partial: Value,
        response: &Value,
        expected_requests: usize,
    ) -> Mock {
        let url = format!("{API_PREFIX}/trainers/{trainer_id}/updates/");

        self.setup
            .server
            .mock("POST", url.as_str())
            .match_body(Matcher::PartialJson(partial))
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(response.to_string())
            .expect(expected_requests)
            .create()
    }

    /// Create a mock GET endpoint at `/users/{user_id}/`.
    pub fn create_user_endpoint(
        &mut self,
        user_id: i64,
        user: &Value,
        expected_requests: usize,
    ) -> Mock {
        let path = format!("/users/{user_id}/");
        self.create_endpoint("GET", &path, 200, user, expected_requests)
    }

    /// Create a mock GET endpoint at `/users/social/` matching `provider` and a
    /// comma separated `uid` list.
    pub fn create_social_connections_endpoint(
        &mut self,
        provider: &str,
        uids: &str,
        connections: &[Value],
        expected_requests: usize,
    ) -> Mock {
        let url = format!("{API_PREFIX}/users/social/");

        self.setup
            .server
            .mock("GET", url.as_str())
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("provider".into(), provider.into()),
                Matcher::UrlEncoded("uid".into(), uids.into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(Value::Array(connections.to_vec()).to_string())
            .expect(expected_requests)
            .create()
    }

    /// Create a mock GET endpoint at `/users/social/?user={user_id}`.
    pub fn create_user_social_connections_endpoint(
        &mut self,
        user_id: i64,
        connections: &[Value],
        expected_requests: usize,
    ) -> Mock {
        let url = format!("{API_PREFIX}/users/social/");

        self.setup
            .server
            .mock("GET", url.as_str())
            .match_query(Matcher::UrlEncoded("user".into(), user_id.to_string()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(Value::Array(connections.to_vec()).to_string())
            .expect(expected_requests)
            .create()
    }

    /// Create a mock leaderboard endpoint.
    ///
    /// # Arguments
    /// - `scope` - Scope segment, e.g. `v1.1` or `discord/1234`
    /// - `stat` - Stat segment
    pub fn create_leaderboard_endpoint(
        &mut self,
        scope: &str,
        stat: &str,
        page: &Value,
        expected_requests: usize,
    ) -> Mock {
        let path = format!("/leaderboard/{scope}/{stat}/");
        self.create_endpoint("GET", &path, 200, page, expected_requests)
    }

    /// Create a mock endpoint answering `method path` with an error status.
    pub fn create_error_endpoint(
        &mut self,
        method: &str,
        path: &str,
        status: usize,
        expected_requests: usize,
    ) -> Mock {
        let body = serde_json::json!({ "detail": "error" });
        self.create_endpoint(method, path, status, &body, expected_requests)
    }
}

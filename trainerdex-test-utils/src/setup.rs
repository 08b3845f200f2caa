use mockito::{Mock, Server, ServerGuard};

use crate::constant::TEST_TOKEN;

pub struct TestSetup {
    pub server: ServerGuard,
    pub mocks: Vec<Mock>,
}

impl TestSetup {
    pub async fn new() -> Self {
        Self {
            server: Server::new_async().await,
            mocks: Vec::new(),
        }
    }

    /// Build any connector type that can be constructed from `(host, token)`.
    /// This allows building the library's HTTP connector without creating a
    /// circular dependency.
    ///
    /// # Example
    /// ```ignore
    /// let connector: HttpConnector = test.connector();
    /// ```
    pub fn connector<T>(&self) -> T
    where
        T: From<(String, String)>,
    {
        T::from((self.server.url(), TEST_TOKEN.to_string()))
    }

    /// Assert all mock endpoints were called as expected.
    ///
    /// # Panics
    /// Panics if any mock endpoint was not called the expected number of times
    pub fn assert_mocks(&self) {
        for mock in &self.mocks {
            mock.assert();
        }
    }
}

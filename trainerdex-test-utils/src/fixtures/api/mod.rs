use crate::TestSetup;

pub mod mock;
pub mod mockito;

impl TestSetup {
    pub fn api<'a>(&'a mut self) -> ApiFixtures<'a> {
        ApiFixtures { setup: self }
    }
}

pub struct ApiFixtures<'a> {
    pub setup: &'a mut TestSetup,
}

use std::{collections::HashSet, sync::Arc};

use serde_json::{json, Value};
use trainerdex_test_utils::prelude::*;
use uuid::Uuid;

use super::{
    social_connection::{ProviderLookup, SocialConnection},
    trainer::Trainer,
    update::Update,
    user::User,
    Entity, Relation,
};
use crate::{
    connector::{http::HttpConnector, retry::RetryPolicy, ConnectorRef},
    error::{Error, ValidationError},
    model::{
        id::{SocialConnectionKey, TrainerId, UserId},
        stats::Stats,
        Record,
    },
};

mod user;

fn connector(test: &TestSetup) -> ConnectorRef {
    ConnectorRef::new(
        test.connector::<HttpConnector>()
            .with_retry(RetryPolicy::none()),
    )
}

fn record(value: Value) -> Record {
    value.as_object().cloned().unwrap()
}

fn update_uuid(index: usize) -> Uuid {
    Uuid::parse_str(TEST_UPDATE_UUIDS[index]).unwrap()
}

fn mock_trainer(test: &mut TestSetup, trainer_id: i64, owner_id: i64) -> Trainer {
    let wire = test.api().with_mock_trainer(trainer_id, owner_id, "Ash");
    Trainer::from_wire(connector(test), &record(wire)).unwrap()
}

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of the last pipeline run as reported for a node.
///
/// Only a source service carries an authored status; every other node
/// mirrors the status of whatever feeds it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    #[default]
    Unknown,
    SuccessWithWarehouse,
    SuccessNothingNew,
    Success,
    ErrorServicePull,
    ErrorServicePush,
    ErrorDataModelize,
    ErrorDataEgress,
    ErrorInternalUnknown,
}

impl Status {
    /// Statuses a user may pick for a source service, in menu order.
    pub const SELECTABLE: [Status; 7] = [
        Status::Success,
        Status::SuccessNothingNew,
        Status::ErrorServicePull,
        Status::ErrorDataEgress,
        Status::ErrorDataModelize,
        Status::ErrorServicePush,
        Status::Unknown,
    ];

    pub fn is_success(self) -> bool {
        matches!(
            self,
            Status::Success | Status::SuccessWithWarehouse | Status::SuccessNothingNew
        )
    }

    pub fn is_error(self) -> bool {
        matches!(
            self,
            Status::ErrorServicePull
                | Status::ErrorServicePush
                | Status::ErrorDataModelize
                | Status::ErrorDataEgress
                | Status::ErrorInternalUnknown
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Unknown => "UNKNOWN",
            Status::SuccessWithWarehouse => "SUCCESS_WITH_WAREHOUSE",
            Status::SuccessNothingNew => "SUCCESS_NOTHING_NEW",
            Status::Success => "SUCCESS",
            Status::ErrorServicePull => "ERROR_SERVICE_PULL",
            Status::ErrorServicePush => "ERROR_SERVICE_PUSH",
            Status::ErrorDataModelize => "ERROR_DATA_MODELIZE",
            Status::ErrorDataEgress => "ERROR_DATA_EGRESS",
            Status::ErrorInternalUnknown => "ERROR_INTERNAL_UNKNOWN",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

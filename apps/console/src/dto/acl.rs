mod conversions;
mod types;

pub use types::{
    AclCellResponse, AclSessionResponse, BulkCommitResponse, EntityFailureResponse,
    OpenAclSessionRequest, PermissionFlagResponse, RestoreDefaultsRequest,
    TogglePermissionRequest,
};

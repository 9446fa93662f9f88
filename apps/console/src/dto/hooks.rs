mod conversions;
mod types;

pub use types::{
    CreateHookRequest, HookGroupResponse, HookResponse, HookSessionResponse,
    OpenHookSessionRequest, UpdateHookFieldsRequest,
};

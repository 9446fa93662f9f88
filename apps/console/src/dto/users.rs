mod types;

pub use types::{
    ChangePasswordRequest, ChangeRoleRequest, CreateUserRequest, UserListQuery, UserResponse,
};

mod conversions;
mod types;

pub use types::{
    AddFieldRequest, AddFieldResponse, CreateEntityTypeRequest, DeleteFieldRequest,
    EntityTypeResponse, FieldNodeResponse, OpenSchemaSessionRequest, RenameFieldRequest,
    SchemaSessionResponse, UpdateFieldRequest,
};

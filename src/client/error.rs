use {
    crate::{
        object::{Interface, ObjectId},
        utils::buffd::MsgParserError,
        wire::WlDisplayId,
    },
    std::error::Error,
    thiserror::Error,
};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Client tried to invoke a non-existent method")]
    InvalidMethod,
    #[error("Client tried to access non-existent object {0}")]
    InvalidObject(ObjectId),
    #[error("The message size is < 8")]
    MessageSizeTooSmall,
    #[error("The size of the message is not a multiple of 4")]
    UnalignedMessage,
    #[error("The message is truncated")]
    IncompleteMessage,
    #[error("The client object id is out of bounds")]
    ClientIdOutOfBounds,
    #[error("The id is already in use")]
    IdAlreadyInUse,
    #[error("The object id is unknown")]
    UnknownId,
    #[error("Object {0} is not a display")]
    NotADisplay(WlDisplayId),
    #[error("The client has reached its limit of {0} objects")]
    TooManyObjects(usize),
    #[error("Could not allocate memory for the object table")]
    OutOfMemory,
    #[error("Could not process a `{}.{}` request on object {}", .interface.name(), .method, .id)]
    MethodError {
        interface: Interface,
        id: ObjectId,
        method: &'static str,
        #[source]
        error: Box<dyn Error>,
    },
    #[error(transparent)]
    LookupError(LookupError),
    #[error("Could not add object {0} to the client")]
    AddObjectError(ObjectId, #[source] Box<ClientError>),
}

#[derive(Debug, Error)]
#[error("Parsing failed")]
pub struct ParserError(#[source] pub MsgParserError);

#[derive(Debug, Error)]
#[error("There is no `{}` with id {}", .interface.name(), .id)]
pub struct LookupError {
    pub interface: Interface,
    pub id: ObjectId,
}

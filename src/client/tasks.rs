use {
    crate::{
        client::{Client, ClientError},
        object::ObjectId,
        utils::{
            buffd::{HEADER_SIZE, MsgParser, read_header},
            errorfmt::ErrorFmt,
        },
    },
    std::rc::Rc,
};

pub fn dispatch(client: &Rc<Client>, data: &[u8]) {
    let mut pos = 0;
    while pos < data.len() {
        if client.is_shut_down() {
            log::debug!(
                "Client {} is shutting down. Ignoring {} bytes of requests",
                client.id,
                data.len() - pos,
            );
            return;
        }
        match dispatch_one(client, &data[pos..]) {
            Ok(len) => pos += len,
            Err(e) => {
                match e {
                    ClientError::InvalidObject(_) | ClientError::InvalidMethod => {
                        log::error!(
                            "Could not handle a message from client {}: {}",
                            client.id,
                            ErrorFmt(e),
                        );
                    }
                    _ => client.error(e),
                }
                return;
            }
        }
    }
}

fn dispatch_one(client: &Rc<Client>, data: &[u8]) -> Result<usize, ClientError> {
    let Some((obj_id, len, request)) = read_header(data) else {
        return Err(ClientError::IncompleteMessage);
    };
    let obj_id = ObjectId::from_raw(obj_id);
    if len < HEADER_SIZE {
        return Err(ClientError::MessageSizeTooSmall);
    }
    if len % 4 != 0 {
        return Err(ClientError::UnalignedMessage);
    }
    let Some(body) = data.get(HEADER_SIZE..len) else {
        return Err(ClientError::IncompleteMessage);
    };
    let obj = match client.objects.get_obj(obj_id) {
        Ok(obj) => obj,
        _ => {
            client.invalid_object(obj_id);
            return Err(ClientError::InvalidObject(obj_id));
        }
    };
    if let Err(e) = obj.clone().handle_request(client, request, MsgParser::new(body)) {
        if let ClientError::InvalidMethod = e {
            client.invalid_request(&*obj, request);
        }
        return Err(e);
    }
    Ok(len)
}

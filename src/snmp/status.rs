/// error-status из PDU ответа (RFC 3416)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorStatus {
    TooBig,
    NoSuchName,
    BadValue,
    ReadOnly,
    GenErr,
    NoAccess,
    WrongType,
    WrongLength,
    WrongEncoding,
    WrongValue,
    NoCreation,
    InconsistentValue,
    ResourceUnavailable,
    CommitFailed,
    UndoFailed,
    AuthorizationError,
    NotWritable,
    InconsistentName,
    Other(u32),
}

impl ErrorStatus {
    /// `None` для noError (0)
    pub fn from_code(code: u32) -> Option<Self> {
        let status = match code {
            0 => return None,
            1 => ErrorStatus::TooBig,
            2 => ErrorStatus::NoSuchName,
            3 => ErrorStatus::BadValue,
            4 => ErrorStatus::ReadOnly,
            5 => ErrorStatus::GenErr,
            6 => ErrorStatus::NoAccess,
            7 => ErrorStatus::WrongType,
            8 => ErrorStatus::WrongLength,
            9 => ErrorStatus::WrongEncoding,
            10 => ErrorStatus::WrongValue,
            11 => ErrorStatus::NoCreation,
            12 => ErrorStatus::InconsistentValue,
            13 => ErrorStatus::ResourceUnavailable,
            14 => ErrorStatus::CommitFailed,
            15 => ErrorStatus::UndoFailed,
            16 => ErrorStatus::AuthorizationError,
            17 => ErrorStatus::NotWritable,
            18 => ErrorStatus::InconsistentName,
            other => ErrorStatus::Other(other),
        };
        Some(status)
    }

    /// Стабильный код для записи об ошибке
    pub fn code(self) -> String {
        match self {
            ErrorStatus::Other(code) => format!("ERR_{code}"),
            known => format!("ERR_{known:?}"),
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            ErrorStatus::TooBig => "The size of the Response-PDU would be too large to transport",
            ErrorStatus::NoSuchName => "The name of a requested object was not found",
            ErrorStatus::BadValue => {
                "A value in the request didn't match the structure that the recipient of the request had for the object"
            }
            ErrorStatus::ReadOnly => {
                "An attempt was made to set a variable that has an Access value indicating that it is read-only"
            }
            ErrorStatus::GenErr => {
                "An error occurred other than one indicated by a more specific error code"
            }
            ErrorStatus::NoAccess => "Access was denied to the object for security reasons",
            ErrorStatus::WrongType => {
                "The object type in a variable binding is incorrect for the object"
            }
            ErrorStatus::WrongLength => {
                "A variable binding specifies a length incorrect for the object"
            }
            ErrorStatus::WrongEncoding => {
                "A variable binding specifies an encoding incorrect for the object"
            }
            ErrorStatus::WrongValue => {
                "The value given in a variable binding is not possible for the object"
            }
            ErrorStatus::NoCreation => "A specified variable does not exist and cannot be created",
            ErrorStatus::InconsistentValue => {
                "A variable binding specifies a value that could be held by the variable but cannot be assigned to it at this time"
            }
            ErrorStatus::ResourceUnavailable => {
                "An attempt to set a variable required a resource that is not available"
            }
            ErrorStatus::CommitFailed => "An attempt to set a particular variable failed",
            ErrorStatus::UndoFailed => {
                "An attempt to set a variable as part of a group failed, and undoing the other settings was not successful"
            }
            ErrorStatus::AuthorizationError => "A problem occurred in authorization",
            ErrorStatus::NotWritable => "The variable cannot be written or created",
            ErrorStatus::InconsistentName => {
                "The name in a variable binding specifies a variable that does not exist"
            }
            ErrorStatus::Other(_) => "Unknown SNMP error status",
        }
    }
}

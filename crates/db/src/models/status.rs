//! Enums mapping to SMALLSERIAL lookup tables.
//!
//! Discriminants match the seed order (1-based) of the corresponding
//! `*_statuses` table.

use tripsync_core::availability::AvailabilityStatus;

/// Status ID type matching SMALLINT/SMALLSERIAL in the database.
pub type StatusId = i16;

macro_rules! define_status_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $val:expr ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[repr(i16)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $( $(#[$vmeta])* $variant = $val ),+
        }

        impl $name {
            /// Return the database status ID.
            pub fn id(self) -> StatusId {
                self as StatusId
            }

            /// Look up the variant for a database status ID.
            pub fn from_id(id: StatusId) -> Option<Self> {
                match id {
                    $( v if v == $val => Some($name::$variant), )+
                    _ => None,
                }
            }
        }

        impl From<$name> for StatusId {
            fn from(value: $name) -> Self {
                value as StatusId
            }
        }
    };
}

define_status_enum! {
    /// Membership state of a user on a trip. Only `Accepted` members count
    /// toward period generation.
    MemberStatus {
        Pending = 1,
        Accepted = 2,
        Declined = 3,
    }
}

define_status_enum! {
    /// Ledger row status as stored in `availabilities.status_id`.
    AvailabilityStatusId {
        Free = 1,
        Flexible = 2,
        Busy = 3,
    }
}

impl From<AvailabilityStatus> for AvailabilityStatusId {
    fn from(status: AvailabilityStatus) -> Self {
        match status {
            AvailabilityStatus::Free => AvailabilityStatusId::Free,
            AvailabilityStatus::Flexible => AvailabilityStatusId::Flexible,
            AvailabilityStatus::Busy => AvailabilityStatusId::Busy,
        }
    }
}

impl From<AvailabilityStatusId> for AvailabilityStatus {
    fn from(id: AvailabilityStatusId) -> Self {
        match id {
            AvailabilityStatusId::Free => AvailabilityStatus::Free,
            AvailabilityStatusId::Flexible => AvailabilityStatus::Flexible,
            AvailabilityStatusId::Busy => AvailabilityStatus::Busy,
        }
    }
}

//! ID utilities (room name candidates).

use uuid::Uuid;

/// Namespace prepended to every generated room name.
pub const ROOM_PREFIX: &str = "room-";

/// Length of the random suffix, in hex chars.
const SUFFIX_LEN: usize = 8;

/// Generate a candidate room name: `room-` followed by 8 hex chars of a v4 UUID.
pub fn new_room_name() -> String {
    let uuid = Uuid::new_v4().simple().to_string();
    format!("{ROOM_PREFIX}{}", &uuid[..SUFFIX_LEN])
}

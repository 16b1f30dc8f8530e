//! Friend management.

mod core;
mod endpoints;

pub use core::{Friend, NewFriend, create_friend, create_friend_table, get_friend};
pub use endpoints::{
    create_friend_endpoint, delete_friend_endpoint, list_friends_endpoint, update_friend_endpoint,
};

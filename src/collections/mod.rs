pub mod singly_linked_list;
pub mod stack;

pub use singly_linked_list::{ListError, ListResult, SinglyLinkedList, SinglyLinkedListCursor};
pub use stack::LinkedListStack;

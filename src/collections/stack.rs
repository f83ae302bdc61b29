use super::singly_linked_list::{ListResult, SinglyLinkedList};

/// a LIFO stack whose top is the head of a `SinglyLinkedList`. every
/// operation is a single call at the head of the list and is O(1)
pub struct LinkedListStack<T> {
    list: SinglyLinkedList<T>,
}

impl<T> LinkedListStack<T> {
    pub const fn new() -> Self {
        Self {
            list: SinglyLinkedList::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn clear(&mut self) {
        self.list.clear();
    }

    /// put `data` on top of the stack
    pub fn push(&mut self, data: T) {
        self.list.insert_first(data);
    }

    /// remove and return the top of the stack, `ListError::Empty` if there is
    /// nothing to pop
    pub fn pop(&mut self) -> ListResult<T> {
        self.list.delete_first()
    }

    /// borrow the top of the stack, `ListError::Empty` if there is nothing on
    /// it
    pub fn peek(&self) -> ListResult<&T> {
        self.list.first()
    }

    /// visit every element from the top of the stack to the bottom, leaving
    /// the stack exactly as it was.
    ///
    /// the stack is drained into a scratch stack (reversing it) while each
    /// element is visited, then drained back (reversing it again)
    pub fn for_each_top_down<F: FnMut(&T)>(&mut self, mut f: F) {
        let mut scratch = LinkedListStack::new();
        while let Ok(data) = self.pop() {
            f(&data);
            scratch.push(data);
        }

        log::trace!("restoring {} drained stack elements", scratch.len());
        while let Ok(data) = scratch.pop() {
            self.push(data);
        }
    }
}

impl<T> Default for LinkedListStack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: core::fmt::Debug> core::fmt::Debug for LinkedListStack<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LinkedListStack")
            .field("top_to_bottom", &self.list)
            .finish()
    }
}

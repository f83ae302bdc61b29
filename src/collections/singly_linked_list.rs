cfg_if::cfg_if! {
    if #[cfg(feature = "no-std")] {
        use alloc::boxed::Box;
        use alloc::vec::Vec;
    } else {
        use std::boxed::Box;
        use std::vec::Vec;
    }
}

pub type ListResult<T> = Result<T, ListError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ListError {
    #[error("the list is empty")]
    Empty,
    #[error("index {index} is out of range for a list of length {len}")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("the cursor has no more elements")]
    Exhausted,
    #[error("remove_curr requires an advance since the last removal")]
    IllegalRemoval,
}

type Link<T> = Option<Box<Node<T>>>;

/// a single element of the list along with the link to its successor. nodes
/// are only ever owned by the list (or the link of the node before them) and
/// never handed out
struct Node<T> {
    data: T,
    next: Link<T>,
}

impl<T> Node<T> {
    const fn new(data: T) -> Self {
        Self { data, next: None }
    }
}

/// an owning, singly-linked, index addressable list. operations at the head
/// are O(1), positional operations walk from the head and are O(index)
pub struct SinglyLinkedList<T> {
    head: Link<T>,
    /// the number of nodes reachable from `head`
    len: usize,
}

impl<T> SinglyLinkedList<T> {
    /// create a new, empty list
    pub const fn new() -> Self {
        Self { head: None, len: 0 }
    }

    /// get the length of the list
    pub fn len(&self) -> usize {
        self.len
    }

    /// returns true if the length of the list is 0
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// prepend `data`, making it the new head of the list
    pub fn insert_first(&mut self, data: T) {
        let mut node = Box::new(Node::new(data));
        node.next = self.head.take();
        self.head = Some(node);
        self.len += 1;
    }

    /// insert `data` so that it ends up at position `index`. `index` may be
    /// equal to the length of the list, in which case `data` becomes the tail
    pub fn insert_at(&mut self, index: usize, data: T) -> ListResult<()> {
        if index > self.len {
            return Err(ListError::IndexOutOfRange {
                index,
                len: self.len,
            });
        }

        if index == 0 {
            self.insert_first(data);
            return Ok(());
        }

        let before = self.node_at_mut(index - 1)?;
        let mut node = Box::new(Node::new(data));
        node.next = before.next.take();
        before.next = Some(node);
        self.len += 1;
        Ok(())
    }

    /// borrow the head of the list
    pub fn first(&self) -> ListResult<&T> {
        self.head
            .as_deref()
            .map(|node| &node.data)
            .ok_or(ListError::Empty)
    }

    /// borrow the element at `index`, which must be less than the length of
    /// the list
    pub fn get(&self, index: usize) -> ListResult<&T> {
        if index >= self.len {
            return Err(ListError::IndexOutOfRange {
                index,
                len: self.len,
            });
        }

        if index == 0 {
            return self.first();
        }

        self.node_at(index)
            .map(|node| &node.data)
            .ok_or(ListError::IndexOutOfRange {
                index,
                len: self.len,
            })
    }

    /// remove and return the head of the list
    pub fn delete_first(&mut self) -> ListResult<T> {
        let node = self.head.take().ok_or(ListError::Empty)?;
        let Node { data, next } = *node;
        self.head = next;
        self.len -= 1;
        Ok(data)
    }

    /// remove and return the element at `index`, which must be less than the
    /// length of the list
    pub fn delete_at(&mut self, index: usize) -> ListResult<T> {
        let len = self.len;
        if index >= len {
            return Err(ListError::IndexOutOfRange { index, len });
        }

        if index == 0 {
            return self.delete_first();
        }

        let before = self.node_at_mut(index - 1)?;
        let removed = before
            .next
            .take()
            .ok_or(ListError::IndexOutOfRange { index, len })?;
        let Node { data, next } = *removed;
        before.next = next;
        self.len -= 1;
        Ok(data)
    }

    /// drop every element of the list
    pub fn clear(&mut self) {
        unlink_all(self.head.take());
        self.len = 0;
    }

    /// return an immutable iterator over the list, from head to tail
    pub fn iter(&self) -> SinglyLinkedListIter<'_, T> {
        SinglyLinkedListIter {
            next: self.head.as_deref(),
            remaining: self.len,
        }
    }

    /// return a cursor positioned before the head of the list. the cursor
    /// holds the list exclusively until it is dropped
    pub fn cursor(&mut self) -> SinglyLinkedListCursor<'_, T> {
        SinglyLinkedListCursor::new(self)
    }

    fn node_at(&self, index: usize) -> Option<&Node<T>> {
        let mut curr = self.head.as_deref();
        for _ in 0..index {
            curr = curr.and_then(|node| node.next.as_deref());
        }
        curr
    }

    fn node_at_mut(&mut self, index: usize) -> ListResult<&mut Node<T>> {
        let len = self.len;
        let mut curr = self.head.as_deref_mut();
        for _ in 0..index {
            curr = curr.and_then(|node| node.next.as_deref_mut());
        }
        curr.ok_or(ListError::IndexOutOfRange { index, len })
    }
}

impl<T: PartialEq> SinglyLinkedList<T> {
    /// find the position of the first element equal to `data`
    pub fn index_of(&self, data: &T) -> Option<usize> {
        self.iter().position(|e| e == data)
    }

    pub fn contains(&self, data: &T) -> bool {
        self.index_of(data).is_some()
    }
}

impl<T: Clone> SinglyLinkedList<T> {
    /// copy the elements, head to tail, into a freshly allocated `Vec`
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }
}

/// drop a chain of nodes one at a time instead of letting `Box` recurse
/// through every `next`
fn unlink_all<T>(mut link: Link<T>) {
    while let Some(mut node) = link {
        link = node.next.take();
    }
}

impl<T> Drop for SinglyLinkedList<T> {
    fn drop(&mut self) {
        unlink_all(self.head.take());
    }
}

impl<T> Default for SinglyLinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for SinglyLinkedList<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T: PartialEq> PartialEq for SinglyLinkedList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for SinglyLinkedList<T> {}

impl<T: core::fmt::Debug> core::fmt::Debug for SinglyLinkedList<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> FromIterator<T> for SinglyLinkedList<T> {
    /// the first element yielded becomes the head
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut ll = Self::new();
        let mut tail = &mut ll.head;
        for data in iter {
            tail = &mut tail.insert(Box::new(Node::new(data))).next;
            ll.len += 1;
        }
        ll
    }
}

impl<T> IntoIterator for SinglyLinkedList<T> {
    type Item = T;
    type IntoIter = SinglyLinkedListIntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        SinglyLinkedListIntoIter { ll: self }
    }
}

impl<'a, T> IntoIterator for &'a SinglyLinkedList<T> {
    type Item = &'a T;
    type IntoIter = SinglyLinkedListIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct SinglyLinkedListIter<'a, T> {
    next: Option<&'a Node<T>>,
    remaining: usize,
}

impl<'a, T> Iterator for SinglyLinkedListIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.next.map(|node| {
            self.next = node.next.as_deref();
            self.remaining = self.remaining.saturating_sub(1);
            &node.data
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> ExactSizeIterator for SinglyLinkedListIter<'a, T> {}

pub struct SinglyLinkedListIntoIter<T> {
    ll: SinglyLinkedList<T>,
}

impl<T> Iterator for SinglyLinkedListIntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.ll.delete_first().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.ll.len(), Some(self.ll.len()))
    }
}

impl<T> ExactSizeIterator for SinglyLinkedListIntoIter<T> {}

/// a forward-only cursor that can remove the element it last advanced to.
///
/// rather than tracking the previous node, the cursor holds the link that owns
/// the node under consideration: the list's head link before the first node
/// has been stepped past, the `next` link of the previous node afterwards.
/// removing rewrites that link to the removed node's successor, which covers
/// removing the head and removing from the middle the same way
pub struct SinglyLinkedListCursor<'a, T> {
    link: Option<&'a mut Link<T>>,
    len: &'a mut usize,
    /// set by `advance`, cleared by `remove_curr`. while set, `link` owns the
    /// current node; while clear, it owns the next node to advance to
    can_remove: bool,
}

impl<'a, T> SinglyLinkedListCursor<'a, T> {
    fn new(ll: &'a mut SinglyLinkedList<T>) -> Self {
        let SinglyLinkedList { head, len } = ll;
        Self {
            link: Some(head),
            len,
            can_remove: false,
        }
    }

    /// returns true if a call to `advance` would succeed
    pub fn has_next(&self) -> bool {
        match self.link.as_deref() {
            Some(Some(node)) if self.can_remove => node.next.is_some(),
            Some(Some(_)) => true,
            Some(None) | None => false,
        }
    }

    /// move the cursor forward one element and return that element, which
    /// becomes eligible for `remove_curr`
    pub fn advance(&mut self) -> ListResult<&T> {
        if !self.has_next() {
            return Err(ListError::Exhausted);
        }

        if self.can_remove {
            // step past the current node
            self.link = match self.link.take() {
                Some(Some(node)) => Some(&mut node.next),
                _ => None,
            };
        }

        match self.link.as_deref() {
            Some(Some(node)) => {
                self.can_remove = true;
                Ok(&node.data)
            }
            _ => Err(ListError::Exhausted),
        }
    }

    /// get the element the cursor last advanced to, or None if it has been
    /// removed or the cursor has not advanced yet
    pub fn curr(&self) -> Option<&T> {
        if !self.can_remove {
            return None;
        }
        self.link
            .as_deref()
            .and_then(|link| link.as_deref())
            .map(|node| &node.data)
    }

    /// unlink and return the element the cursor last advanced to. only one
    /// removal is allowed per `advance`
    pub fn remove_curr(&mut self) -> ListResult<T> {
        if !self.can_remove {
            return Err(ListError::IllegalRemoval);
        }

        let link = self.link.as_deref_mut().ok_or(ListError::IllegalRemoval)?;
        let node = link.take().ok_or(ListError::IllegalRemoval)?;
        let Node { data, next } = *node;
        *link = next;
        *self.len -= 1;
        self.can_remove = false;
        log::trace!("cursor removed an element, {} remaining", *self.len);
        Ok(data)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const SMALL_TEST_ARRAY: [u32; 4] = [42, 73, 19, 112];

    fn small_list() -> SinglyLinkedList<u32> {
        SMALL_TEST_ARRAY.into_iter().collect()
    }

    #[test]
    fn new_list_is_empty() {
        let ll = SinglyLinkedList::<u32>::new();
        assert!(ll.is_empty());
        assert_eq!(ll.len(), 0);
        assert!(ll.to_vec().is_empty());
    }

    #[test]
    fn first_on_empty_list_returns_err() {
        let ll = SinglyLinkedList::<u32>::new();
        assert_eq!(ll.first(), Err(ListError::Empty));
    }

    #[test]
    fn delete_first_on_empty_list_returns_err() {
        let mut ll = SinglyLinkedList::<u32>::new();
        assert_eq!(ll.delete_first(), Err(ListError::Empty));
        assert_eq!(ll.len(), 0);
    }

    #[test]
    fn can_insert_first() {
        let mut ll = SinglyLinkedList::new();
        ll.insert_first(73);
        assert_eq!(ll.len(), 1);
        ll.insert_first(42);
        assert_eq!(ll.len(), 2);
        assert_eq!(ll.first(), Ok(&42));
        assert_eq!(ll.to_vec(), vec![42, 73]);
    }

    #[test]
    fn can_insert_at_head_middle_and_tail() {
        let mut ll = SinglyLinkedList::new();
        ll.insert_at(0, 2).expect("failed to insert at head of empty list");
        ll.insert_at(1, 4).expect("failed to insert at tail");
        ll.insert_at(1, 3).expect("failed to insert in the middle");
        ll.insert_at(0, 1).expect("failed to insert at head");
        assert_eq!(ll.to_vec(), vec![1, 2, 3, 4]);
        assert_eq!(ll.len(), 4);
    }

    #[test]
    fn insert_past_len_returns_err_and_leaves_list_alone() {
        let mut ll = small_list();
        let res = ll.insert_at(5, 0);
        assert_eq!(res, Err(ListError::IndexOutOfRange { index: 5, len: 4 }));
        assert_eq!(ll.to_vec(), SMALL_TEST_ARRAY.to_vec());
    }

    #[test]
    fn can_get_every_index() {
        let ll = small_list();
        for (i, expected) in SMALL_TEST_ARRAY.iter().enumerate() {
            assert_eq!(ll.get(i), Ok(expected));
        }
    }

    #[test]
    fn get_at_len_returns_err() {
        let ll = small_list();
        assert_eq!(ll.get(4), Err(ListError::IndexOutOfRange { index: 4, len: 4 }));
        assert_eq!(
            SinglyLinkedList::<u32>::new().get(0),
            Err(ListError::IndexOutOfRange { index: 0, len: 0 })
        );
    }

    #[test]
    fn can_delete_at_head_middle_and_tail() {
        let mut ll = small_list();
        assert_eq!(ll.delete_at(3), Ok(112));
        assert_eq!(ll.delete_at(1), Ok(73));
        assert_eq!(ll.delete_at(0), Ok(42));
        assert_eq!(ll.to_vec(), vec![19]);
        assert_eq!(ll.len(), 1);
        assert_eq!(ll.delete_at(0), Ok(19));
        assert!(ll.is_empty());
    }

    #[test]
    fn delete_at_len_returns_err_and_leaves_list_alone() {
        let mut ll = small_list();
        assert_eq!(
            ll.delete_at(4),
            Err(ListError::IndexOutOfRange { index: 4, len: 4 })
        );
        assert_eq!(ll.len(), 4);
        assert_eq!(ll.to_vec(), SMALL_TEST_ARRAY.to_vec());
    }

    #[test]
    fn index_of_finds_first_occurrence() {
        let mut ll = small_list();
        ll.insert_at(4, 73).expect("failed to insert at tail");
        assert_eq!(ll.index_of(&73), Some(1));
        assert_eq!(ll.index_of(&112), Some(3));
        assert_eq!(ll.index_of(&7), None);
        assert!(ll.contains(&19));
        assert!(!ll.contains(&7));
    }

    #[test]
    fn clear_empties_list() {
        let mut ll = small_list();
        ll.clear();
        assert!(ll.is_empty());
        assert_eq!(ll.first(), Err(ListError::Empty));
        ll.insert_first(1);
        assert_eq!(ll.to_vec(), vec![1]);
    }

    #[test]
    fn to_vec_does_not_alias_the_list() {
        let mut ll = small_list();
        let snapshot = ll.to_vec();
        ll.delete_first().expect("failed to delete");
        assert_eq!(snapshot, SMALL_TEST_ARRAY.to_vec());
    }

    #[test]
    fn collect_preserves_order() {
        let ll = small_list();
        assert_eq!(ll.first(), Ok(&42));
        assert_eq!(ll.len(), SMALL_TEST_ARRAY.len());
        assert!(ll.iter().eq(SMALL_TEST_ARRAY.iter()));
        assert_eq!(ll.into_iter().collect::<Vec<_>>(), SMALL_TEST_ARRAY.to_vec());
    }

    #[test]
    fn clone_and_eq() {
        let ll = small_list();
        let mut other = ll.clone();
        assert_eq!(ll, other);
        other.delete_first().expect("failed to delete");
        assert_ne!(ll, other);
    }

    #[test]
    fn debug_formats_as_list() {
        assert_eq!(format!("{:?}", small_list()), "[42, 73, 19, 112]");
    }

    #[test]
    fn dropping_a_long_list_does_not_overflow() {
        let ll: SinglyLinkedList<u32> = (0..1_000_000).collect();
        assert_eq!(ll.len(), 1_000_000);
        drop(ll);
    }

    #[test]
    fn cursor_visits_every_element_in_order() {
        let mut ll = small_list();
        let mut cursor = ll.cursor();
        for expected in SMALL_TEST_ARRAY.iter() {
            assert!(cursor.has_next());
            assert_eq!(cursor.advance(), Ok(expected));
            assert_eq!(cursor.curr(), Some(expected));
        }
        assert!(!cursor.has_next());
        assert_eq!(cursor.advance(), Err(ListError::Exhausted));
    }

    #[test]
    fn cursor_on_empty_list_has_nothing() {
        let mut ll = SinglyLinkedList::<u32>::new();
        let mut cursor = ll.cursor();
        assert!(!cursor.has_next());
        assert_eq!(cursor.curr(), None);
        assert_eq!(cursor.advance(), Err(ListError::Exhausted));
        assert_eq!(cursor.remove_curr(), Err(ListError::IllegalRemoval));
    }

    #[test]
    fn remove_before_advance_returns_err() {
        let mut ll = small_list();
        let mut cursor = ll.cursor();
        assert_eq!(cursor.remove_curr(), Err(ListError::IllegalRemoval));
        drop(cursor);
        assert_eq!(ll.len(), 4);
    }

    #[test]
    fn remove_twice_returns_err() {
        let mut ll = small_list();
        let mut cursor = ll.cursor();
        cursor.advance().expect("failed to advance");
        assert_eq!(cursor.remove_curr(), Ok(42));
        assert_eq!(cursor.curr(), None);
        assert_eq!(cursor.remove_curr(), Err(ListError::IllegalRemoval));
        drop(cursor);
        assert_eq!(ll.to_vec(), vec![73, 19, 112]);
    }

    #[test]
    fn can_remove_head_and_keep_going() {
        let mut ll = small_list();
        let mut cursor = ll.cursor();
        cursor.advance().expect("failed to advance");
        cursor.remove_curr().expect("failed to remove head");
        assert_eq!(cursor.advance(), Ok(&73));
        assert_eq!(cursor.advance(), Ok(&19));
        drop(cursor);
        assert_eq!(ll.first(), Ok(&73));
        assert_eq!(ll.len(), 3);
    }

    #[test]
    fn can_remove_middle_and_tail() {
        let mut ll = small_list();
        let mut cursor = ll.cursor();
        cursor.advance().expect("failed to advance");
        cursor.advance().expect("failed to advance");
        assert_eq!(cursor.remove_curr(), Ok(73));
        assert!(cursor.has_next());
        cursor.advance().expect("failed to advance");
        cursor.advance().expect("failed to advance");
        assert_eq!(cursor.remove_curr(), Ok(112));
        assert!(!cursor.has_next());
        drop(cursor);
        assert_eq!(ll.to_vec(), vec![42, 19]);
        assert_eq!(ll.len(), 2);
    }

    #[test]
    fn removing_after_every_advance_empties_list() {
        let mut ll = small_list();
        let mut cursor = ll.cursor();
        let mut removed = Vec::new();
        while cursor.has_next() {
            cursor.advance().expect("failed to advance");
            removed.push(cursor.remove_curr().expect("failed to remove"));
        }
        drop(cursor);
        assert_eq!(removed, SMALL_TEST_ARRAY.to_vec());
        assert!(ll.is_empty());
        assert!(ll.to_vec().is_empty());
        assert_eq!(ll.first(), Err(ListError::Empty));
    }
}

// proptest doesn't run under miri with default config
#[cfg(all(not(miri), test))]
mod proptests {
    use proptest::collection::vec;
    use proptest::prelude::*;
    use proptest::test_runner::Config;
    use proptest_state_machine::{ReferenceStateMachine, StateMachineTest};
    use rand::Rng;

    use super::*;

    proptest_state_machine::prop_state_machine! {
        #![proptest_config(Config {
            failure_persistence: None,
            verbose: 1,
            .. Config::default()
        })]

        #[test]
        fn singly_linked_list_state_machine_test(
            sequential
            100..500
            =>
            SinglyLinkedList<u32>
        );
    }

    /// The possible transitions of the state machine. Indices are drawn from
    /// `0..=len + 1` so both bound violations get exercised.
    #[derive(Clone, Debug)]
    pub enum Transition {
        InsertFirst(u32),
        InsertAt(usize, u32),
        DeleteFirst,
        DeleteAt(usize),
        Get(usize),
        RemoveEvens,
        Clear,
    }

    pub struct SinglyLinkedListStateMachine;

    impl ReferenceStateMachine for SinglyLinkedListStateMachine {
        type State = Vec<u32>;
        type Transition = Transition;

        fn init_state() -> BoxedStrategy<Self::State> {
            Just(Vec::new()).boxed()
        }

        fn transitions(state: &Self::State) -> BoxedStrategy<Self::Transition> {
            let bound = state.len() + 2;
            prop_oneof![
                3 => any::<u32>().prop_map(Transition::InsertFirst),
                3 => (0..bound, any::<u32>()).prop_map(|(i, v)| Transition::InsertAt(i, v)),
                1 => Just(Transition::DeleteFirst),
                2 => (0..bound).prop_map(Transition::DeleteAt),
                1 => (0..bound).prop_map(Transition::Get),
                1 => Just(Transition::RemoveEvens),
                1 => Just(Transition::Clear),
            ]
            .boxed()
        }

        fn apply(mut state: Self::State, transition: &Self::Transition) -> Self::State {
            match transition {
                Transition::InsertFirst(value) => state.insert(0, *value),
                Transition::InsertAt(index, value) => {
                    if *index <= state.len() {
                        state.insert(*index, *value);
                    }
                }
                Transition::DeleteFirst => {
                    if !state.is_empty() {
                        state.remove(0);
                    }
                }
                Transition::DeleteAt(index) => {
                    if *index < state.len() {
                        state.remove(*index);
                    }
                }
                Transition::Get(_) => {}
                Transition::RemoveEvens => state.retain(|v| v % 2 != 0),
                Transition::Clear => state.clear(),
            }
            state
        }
    }

    impl StateMachineTest for SinglyLinkedList<u32> {
        type SystemUnderTest = Self;
        type Reference = SinglyLinkedListStateMachine;

        fn init_test(
            _ref_state: &<Self::Reference as ReferenceStateMachine>::State,
        ) -> Self::SystemUnderTest {
            Self::new()
        }

        fn apply(
            mut state: Self::SystemUnderTest,
            _ref_state: &<Self::Reference as ReferenceStateMachine>::State,
            transition: Transition,
        ) -> Self::SystemUnderTest {
            let len = state.len();
            match transition {
                Transition::InsertFirst(value) => {
                    state.insert_first(value);
                    assert_eq!(state.first(), Ok(&value));
                }
                Transition::InsertAt(index, value) => {
                    let res = state.insert_at(index, value);
                    if index <= len {
                        assert_eq!(res, Ok(()));
                        assert_eq!(state.get(index), Ok(&value));
                    } else {
                        assert_eq!(res, Err(ListError::IndexOutOfRange { index, len }));
                    }
                }
                Transition::DeleteFirst => {
                    let expected = state.first().copied();
                    assert_eq!(state.delete_first(), expected);
                }
                Transition::DeleteAt(index) => {
                    let expected = state.get(index).copied();
                    let res = state.delete_at(index);
                    assert_eq!(res, expected);
                    if index >= len {
                        assert_eq!(res, Err(ListError::IndexOutOfRange { index, len }));
                    }
                }
                Transition::Get(index) => {
                    let res = state.get(index);
                    assert_eq!(res.is_ok(), index < len);
                }
                Transition::RemoveEvens => {
                    let mut cursor = state.cursor();
                    while cursor.has_next() {
                        let even = cursor
                            .advance()
                            .map(|v| v % 2 == 0)
                            .expect("has_next promised an element");
                        if even {
                            cursor.remove_curr().expect("advance allows a removal");
                        }
                    }
                }
                Transition::Clear => state.clear(),
            }
            state
        }

        fn check_invariants(
            state: &Self::SystemUnderTest,
            ref_state: &<Self::Reference as ReferenceStateMachine>::State,
        ) {
            assert_eq!(state.len(), ref_state.len());
            assert_eq!(state.is_empty(), ref_state.is_empty());
            assert_eq!(state.iter().count(), ref_state.len());
            assert_eq!(&state.to_vec(), ref_state);
        }
    }

    proptest! {
        #[test]
        fn index_of_agrees_with_get(values in vec(any::<u8>(), 1..128)) {
            let ll: SinglyLinkedList<u8> = values.iter().copied().collect();

            let picked = values[rand::thread_rng().gen_range(0..values.len())];
            let index = ll.index_of(&picked).expect("picked value must be present");
            prop_assert_eq!(ll.get(index), Ok(&picked));
            prop_assert_eq!(Some(index), values.iter().position(|v| *v == picked));
        }

        #[test]
        fn cursor_visits_each_element_once(values in vec(any::<u32>(), 0..128)) {
            let mut ll: SinglyLinkedList<u32> = values.iter().copied().collect();
            let mut cursor = ll.cursor();
            let mut seen = Vec::new();
            for _ in 0..values.len() {
                seen.push(*cursor.advance().expect("failed to advance"));
            }
            prop_assert!(!cursor.has_next());
            prop_assert_eq!(seen, values);
        }

        #[test]
        fn cursor_removal_matches_retain(values in vec(any::<u32>(), 0..128), divisor in 1u32..8) {
            let mut ll: SinglyLinkedList<u32> = values.iter().copied().collect();
            let mut cursor = ll.cursor();
            while cursor.has_next() {
                let drop_it = cursor
                    .advance()
                    .map(|v| v % divisor == 0)
                    .expect("failed to advance");
                if drop_it {
                    cursor.remove_curr().expect("failed to remove");
                    prop_assert_eq!(cursor.remove_curr(), Err(ListError::IllegalRemoval));
                }
            }
            drop(cursor);

            let mut expected = values.clone();
            expected.retain(|v| v % divisor != 0);
            prop_assert_eq!(ll.len(), expected.len());
            prop_assert_eq!(ll.to_vec(), expected);
        }
    }
}

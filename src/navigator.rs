cfg_if::cfg_if! {
    if #[cfg(feature = "no-std")] {
        use alloc::vec::Vec;
    } else {
        use std::vec::Vec;
    }
}

use crate::collections::{LinkedListStack, SinglyLinkedList};

pub type NavigationResult<T> = Result<T, NavigationError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Back,
    Forward,
}

impl core::fmt::Display for Direction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Direction::Back => f.write_str("back"),
            Direction::Forward => f.write_str("forward"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum NavigationError {
    #[error("there is no page to go {0} to")]
    Empty(Direction),
}

/// browsing history over opaque page tokens `P`.
///
/// `back` holds the pages visited before `current`, most recent on top.
/// `forward` holds the pages left by going back, most recently left on top,
/// and is emptied by every `visit`
#[derive(Debug)]
pub struct Navigator<P> {
    current: Option<P>,
    back: LinkedListStack<P>,
    forward: LinkedListStack<P>,
}

#[cfg(feature = "url")]
pub type WebBrowser = Navigator<url::Url>;

impl<P> Navigator<P> {
    /// create a navigator that has not visited anything
    pub const fn new() -> Self {
        Self {
            current: None,
            back: LinkedListStack::new(),
            forward: LinkedListStack::new(),
        }
    }

    /// create a navigator from a preloaded history ordered from most to least
    /// recently visited. the first page becomes the current page and going
    /// back walks the rest in the order given
    pub fn from_history<I: IntoIterator<Item = P>>(history: I) -> Self {
        let mut history = history.into_iter();
        let current = history.next();

        // pushing straight onto `back` would leave the least recent page on
        // top, so reverse through a scratch stack first
        let mut scratch = LinkedListStack::new();
        for page in history {
            scratch.push(page);
        }
        let mut back = LinkedListStack::new();
        while let Ok(page) = scratch.pop() {
            back.push(page);
        }

        log::debug!("navigator seeded with {} pages behind the current one", back.len());

        Self {
            current,
            back,
            forward: LinkedListStack::new(),
        }
    }

    /// the page currently being viewed, None before the first visit
    pub fn current(&self) -> Option<&P> {
        self.current.as_ref()
    }

    pub fn can_go_back(&self) -> bool {
        !self.back.is_empty()
    }

    pub fn can_go_forward(&self) -> bool {
        !self.forward.is_empty()
    }

    /// make `page` the current page. the previous page, if any, becomes the
    /// top of the back history and the forward history is discarded
    pub fn visit(&mut self, page: P) {
        if let Some(prev) = self.current.replace(page) {
            self.back.push(prev);
            self.forward.clear();
        }
        log::debug!("visited a page, {} pages back", self.back.len());
    }

    /// return to the most recent page in the back history. the page being
    /// left goes on top of the forward history
    pub fn back(&mut self) -> NavigationResult<&P> {
        shift(
            &mut self.current,
            &mut self.back,
            &mut self.forward,
            Direction::Back,
        )
    }

    /// undo the most recent `back`. the page being left goes on top of the
    /// back history
    pub fn forward(&mut self) -> NavigationResult<&P> {
        shift(
            &mut self.current,
            &mut self.forward,
            &mut self.back,
            Direction::Forward,
        )
    }
}

impl<P: Clone> Navigator<P> {
    /// the current page followed by the back history, most recent first.
    /// forward pages are not included.
    ///
    /// the back history is drained and restored to produce this, so it takes
    /// `&mut self`, but no later navigation behaves any differently for it
    pub fn history(&mut self) -> Vec<P> {
        let mut pages = Vec::with_capacity(self.back.len() + 1);
        if let Some(current) = &self.current {
            pages.push(current.clone());
        }
        self.back.for_each_top_down(|page| pages.push(page.clone()));
        pages
    }
}

/// pop the top of `from` into `current`, pushing the page being left onto `to`
fn shift<'a, P>(
    current: &'a mut Option<P>,
    from: &mut LinkedListStack<P>,
    to: &mut LinkedListStack<P>,
    direction: Direction,
) -> NavigationResult<&'a P> {
    let Ok(page) = from.pop() else {
        log::warn!("can't go {direction}, no pages to go to");
        return Err(NavigationError::Empty(direction));
    };

    if let Some(prev) = current.take() {
        to.push(prev);
    }
    log::debug!("went {direction}, {} pages remain {direction}", from.len());
    Ok(&*current.insert(page))
}

impl<P> Default for Navigator<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> From<SinglyLinkedList<P>> for Navigator<P> {
    fn from(history: SinglyLinkedList<P>) -> Self {
        Self::from_history(history)
    }
}


// proptest doesn't run under miri with default config
#[cfg(all(not(miri), test))]
mod proptests {
    use proptest::collection::vec;
    use proptest::prelude::*;
    use proptest_derive::Arbitrary;

    use super::*;

    #[derive(Arbitrary, Clone, Debug)]
    enum Operation {
        Visit(u8),
        Back,
        Forward,
        History,
    }

    /// flat list of every page plus a cursor to the current one
    #[derive(Default)]
    struct ReferenceHistory {
        entries: Vec<u8>,
        current_index: Option<usize>,
    }

    impl ReferenceHistory {
        fn visit(&mut self, page: u8) {
            if let Some(index) = self.current_index {
                self.entries.truncate(index + 1);
            }
            self.entries.push(page);
            self.current_index = Some(self.entries.len() - 1);
        }

        fn back(&mut self) -> Option<u8> {
            match self.current_index {
                Some(index) if index > 0 => {
                    self.current_index = Some(index - 1);
                    Some(self.entries[index - 1])
                }
                _ => None,
            }
        }

        fn forward(&mut self) -> Option<u8> {
            match self.current_index {
                Some(index) if index + 1 < self.entries.len() => {
                    self.current_index = Some(index + 1);
                    Some(self.entries[index + 1])
                }
                _ => None,
            }
        }

        fn history(&self) -> Vec<u8> {
            match self.current_index {
                Some(index) => self.entries[..=index].iter().rev().copied().collect(),
                None => Vec::new(),
            }
        }
    }

    proptest! {
        #[test]
        fn navigator_matches_reference(ops in vec(any::<Operation>(), 0..256)) {
            let mut reference = ReferenceHistory::default();
            let mut nav = Navigator::new();

            for op in ops.iter() {
                match op {
                    Operation::Visit(page) => {
                        reference.visit(*page);
                        nav.visit(*page);
                    }
                    Operation::Back => {
                        let expected = reference.back();
                        prop_assert_eq!(nav.back().ok().copied(), expected);
                    }
                    Operation::Forward => {
                        let expected = reference.forward();
                        prop_assert_eq!(nav.forward().ok().copied(), expected);
                    }
                    Operation::History => {
                        prop_assert_eq!(nav.history(), reference.history());
                    }
                }
                prop_assert_eq!(nav.current().copied(), reference.current_index.map(|i| reference.entries[i]));
            }

            prop_assert_eq!(nav.history(), reference.history());
        }

        #[test]
        fn seeded_matches_visited(pages in vec(any::<u8>(), 1..64)) {
            let mut seeded = Navigator::from_history(pages.iter().copied());
            let mut visited = Navigator::new();
            for page in pages.iter().rev() {
                visited.visit(*page);
            }

            prop_assert_eq!(seeded.history(), pages.clone());
            prop_assert_eq!(visited.history(), pages.clone());
            for expected in pages.iter().skip(1) {
                prop_assert_eq!(seeded.back(), Ok(expected));
                prop_assert_eq!(visited.back(), Ok(expected));
            }
            prop_assert!(seeded.back().is_err());
        }
    }
}

//! Regions and the damage (invalidation) contract.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Something that can be told "a part of me may need redisplay".
///
/// Damage carries no payload. Implementors usually forward it further up
/// their composition tree; the root performs the actual redraw.
pub trait Damage {
    fn damage(&self);
}

/// Non-owning link to a damage receiver, used for parent back-references.
pub type ParentHandle = Weak<dyn Damage>;

/// Downgrade a shared receiver into a [`ParentHandle`].
///
/// # Example
///
/// ```rust
/// use region_fsm::core::{parent_handle, Damage};
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// struct Root {
///     redraws: Cell<usize>,
/// }
///
/// impl Damage for Root {
///     fn damage(&self) {
///         self.redraws.set(self.redraws.get() + 1);
///     }
/// }
///
/// let root = Rc::new(Root { redraws: Cell::new(0) });
/// let handle = parent_handle(&root);
/// handle.upgrade().unwrap().damage();
/// assert_eq!(root.redraws.get(), 1);
/// ```
pub fn parent_handle<T: Damage + 'static>(receiver: &Rc<T>) -> ParentHandle {
    let weak = Rc::downgrade(receiver);
    weak
}

/// Whether two optional handles point at the same receiver.
pub(crate) fn same_parent(a: &Option<ParentHandle>, b: &Option<ParentHandle>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => Weak::ptr_eq(a, b),
        _ => false,
    }
}

/// The endpoint an FSM hands to its regions.
///
/// Regions hold a weak handle to this link rather than to the FSM itself, so
/// the FSM can stay a plain owned value while its parent is swapped freely.
#[derive(Default)]
pub(crate) struct DamageLink {
    parent: RefCell<Option<ParentHandle>>,
}

impl DamageLink {
    pub(crate) fn parent(&self) -> Option<ParentHandle> {
        self.parent.borrow().clone()
    }

    pub(crate) fn replace_parent(&self, parent: Option<ParentHandle>) -> Option<ParentHandle> {
        self.parent.replace(parent)
    }
}

impl Damage for DamageLink {
    fn damage(&self) {
        // Release the borrow before calling out.
        let parent = self.parent.borrow().as_ref().and_then(Weak::upgrade);
        if let Some(parent) = parent {
            parent.damage();
        }
    }
}

/// A named visual element driven by an FSM.
///
/// A region owns an optional content key (an image or label identifier the
/// renderer understands). Changing the content damages the region, which
/// bubbles to the owning FSM and from there to its parent.
///
/// A clone is detached: it keeps the name and content but damages nothing
/// until it is attached to an FSM of its own.
#[derive(Debug)]
pub struct Region {
    name: String,
    content: Option<String>,
    parent: Option<ParentHandle>,
}

impl Clone for Region {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            content: self.content.clone(),
            parent: None,
        }
    }
}

impl Region {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: None,
            parent: None,
        }
    }

    /// Set the initial content without signalling damage.
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    /// Replace the content. Damages the region only when the value changes.
    ///
    /// Returns whether the content changed.
    pub fn set_content(&mut self, content: Option<String>) -> bool {
        if self.content == content {
            return false;
        }
        self.content = content;
        self.damage();
        true
    }

    /// Whether this region has been attached to an owning FSM.
    pub fn is_attached(&self) -> bool {
        self.parent.is_some()
    }

    pub(crate) fn attach(&mut self, parent: ParentHandle) {
        self.parent = Some(parent);
    }

    /// Bubble damage to the owner, if it is still alive.
    pub fn damage(&self) {
        if let Some(parent) = self.parent.as_ref().and_then(Weak::upgrade) {
            parent.damage();
        }
    }
}

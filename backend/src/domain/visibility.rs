//! Read-side visibility rules for shared lists.

use super::{ListView, SharedList, Uid};

/// Whether `viewer` may see `list`: public, owned, or collaborated.
///
/// Anonymous viewers see public lists only.
///
/// # Examples
/// ```
/// use listshare::domain::{CategoryId, SharedList, Uid, is_visible_to};
///
/// let owner = Uid::new("owner").expect("uid");
/// let list = SharedList::new("Hotels".into(), CategoryId::random(), owner.clone(), false);
///
/// assert!(is_visible_to(&list, Some(&owner)));
/// assert!(!is_visible_to(&list, None));
/// ```
pub fn is_visible_to(list: &SharedList, viewer: Option<&Uid>) -> bool {
    if list.is_public {
        return true;
    }
    viewer.is_some_and(|uid| is_related(list, uid))
}

fn is_related(list: &SharedList, uid: &Uid) -> bool {
    &list.owner_uid == uid || list.collaborators.contains(uid)
}

/// Drop public lists the viewer neither owns nor collaborates on when
/// `show_public` is false.
///
/// Consumer-side filter; it narrows an already authorised result.
pub fn apply_show_public(views: Vec<ListView>, viewer: Option<&Uid>, show_public: bool) -> Vec<ListView> {
    if show_public {
        return views;
    }
    views
        .into_iter()
        .filter(|view| viewer.is_some_and(|uid| is_related(&view.list, uid)))
        .collect()
}

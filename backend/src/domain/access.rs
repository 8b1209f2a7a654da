//! Permission predicates shared by every service.
//!
//! All authorisation decisions go through [`AccessPolicy`], which holds the
//! process-wide admin uid. Services never compare uids directly.

use super::{Category, Item, SharedList, Uid};

/// Read-only permission rules built once at startup.
///
/// # Examples
/// ```
/// use listshare::domain::{AccessPolicy, CategoryId, SharedList, Uid};
///
/// let admin = Uid::new("admin").expect("uid");
/// let owner = Uid::new("owner").expect("uid");
/// let policy = AccessPolicy::new(admin.clone());
/// let list = SharedList::new("Films".into(), CategoryId::random(), owner.clone(), true);
///
/// assert!(policy.can_edit(&owner, &list));
/// assert!(policy.can_edit(&admin, &list));
/// assert!(!policy.may_update_list(&admin, &list));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessPolicy {
    admin_uid: Uid,
}

impl AccessPolicy {
    /// Build a policy around the configured admin uid.
    pub fn new(admin_uid: Uid) -> Self {
        Self { admin_uid }
    }

    /// The configured admin uid.
    pub fn admin_uid(&self) -> &Uid {
        &self.admin_uid
    }

    /// Whether `uid` is the configured admin.
    pub fn is_admin(&self, uid: &Uid) -> bool {
        &self.admin_uid == uid
    }

    /// Whether `uid` owns `list`.
    pub fn is_owner(&self, uid: &Uid, list: &SharedList) -> bool {
        &list.owner_uid == uid
    }

    /// Whether `uid` was invited to `list`.
    pub fn is_collaborator(&self, uid: &Uid, list: &SharedList) -> bool {
        list.collaborators.contains(uid)
    }

    /// Admin, owner, or collaborator. Gates every item mutation.
    pub fn can_edit(&self, uid: &Uid, list: &SharedList) -> bool {
        self.is_admin(uid) || self.is_owner(uid, list) || self.is_collaborator(uid, list)
    }

    /// Title, category, and visibility changes are owner-only.
    pub fn may_update_list(&self, uid: &Uid, list: &SharedList) -> bool {
        self.is_owner(uid, list)
    }

    /// Inviting and revoking collaborators is owner-only.
    pub fn may_manage_collaborators(&self, uid: &Uid, list: &SharedList) -> bool {
        self.is_owner(uid, list)
    }

    /// Owner when no other user has contributed items, or admin on a public
    /// list.
    pub fn may_delete_list(&self, uid: &Uid, list: &SharedList, foreign_item_count: u64) -> bool {
        (self.is_owner(uid, list) && foreign_item_count == 0)
            || (self.is_admin(uid) && list.is_public)
    }

    /// Text and sub-category edits are reserved for the item's creator.
    pub fn may_edit_item_fields(&self, uid: &Uid, item: &Item) -> bool {
        &item.added_by == uid
    }

    /// Requires `can_edit` on the parent list plus authorship or admin.
    pub fn may_delete_item(&self, uid: &Uid, list: &SharedList, item: &Item) -> bool {
        self.can_edit(uid, list) && (&item.added_by == uid || self.is_admin(uid))
    }

    /// Items whose parent list is gone may be cleaned up by their creator or
    /// the admin.
    pub fn may_delete_orphan_item(&self, uid: &Uid, item: &Item) -> bool {
        &item.added_by == uid || self.is_admin(uid)
    }

    /// Category owner or admin.
    pub fn may_rename_category(&self, uid: &Uid, category: &Category) -> bool {
        &category.owner_uid == uid || self.is_admin(uid)
    }

    /// Admin only.
    pub fn may_remove_category(&self, uid: &Uid) -> bool {
        self.is_admin(uid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CategoryId, ListId};
    use rstest::{fixture, rstest};

    fn uid(raw: &str) -> Uid {
        Uid::new(raw).expect("uid")
    }

    #[fixture]
    fn policy() -> AccessPolicy {
        AccessPolicy::new(uid("admin"))
    }

    #[fixture]
    fn list() -> SharedList {
        let mut list = SharedList::new("Trips".into(), CategoryId::random(), uid("owner"), false);
        list.collaborators.insert(uid("collab"));
        list
    }

    #[rstest]
    #[case("admin", true)]
    #[case("owner", true)]
    #[case("collab", true)]
    #[case("stranger", false)]
    fn can_edit_covers_admin_owner_and_collaborators(
        policy: AccessPolicy,
        list: SharedList,
        #[case] who: &str,
        #[case] expected: bool,
    ) {
        assert_eq!(policy.can_edit(&uid(who), &list), expected);
    }

    #[rstest]
    #[case("owner", 0, false, true)]
    #[case("owner", 1, false, false)]
    #[case("admin", 0, false, false)]
    #[case("admin", 3, true, true)]
    #[case("collab", 0, true, false)]
    fn delete_list_rule(
        policy: AccessPolicy,
        mut list: SharedList,
        #[case] who: &str,
        #[case] foreign: u64,
        #[case] is_public: bool,
        #[case] expected: bool,
    ) {
        list.is_public = is_public;
        assert_eq!(policy.may_delete_list(&uid(who), &list, foreign), expected);
    }

    #[rstest]
    #[case("collab", true)]
    #[case("admin", true)]
    #[case("owner", false)]
    fn delete_item_needs_authorship_or_admin(
        policy: AccessPolicy,
        list: SharedList,
        #[case] who: &str,
        #[case] expected: bool,
    ) {
        let item = Item::new(ListId::random(), "Rome".into(), "Misc".into(), uid("collab"));
        assert_eq!(policy.may_delete_item(&uid(who), &list, &item), expected);
    }

    #[rstest]
    #[case("collab", true)]
    #[case("admin", true)]
    #[case("owner", false)]
    #[case("stranger", false)]
    fn orphan_items_need_authorship_or_admin(
        policy: AccessPolicy,
        #[case] who: &str,
        #[case] expected: bool,
    ) {
        let item = Item::new(ListId::random(), "Rome".into(), "Misc".into(), uid("collab"));
        assert_eq!(policy.may_delete_orphan_item(&uid(who), &item), expected);
    }

    #[rstest]
    fn only_admin_removes_categories(policy: AccessPolicy) {
        assert!(policy.may_remove_category(&uid("admin")));
        assert!(!policy.may_remove_category(&uid("owner")));
    }

    #[rstest]
    fn category_rename_is_owner_or_admin(policy: AccessPolicy) {
        let category = Category::new_public("Treks", uid("owner"));
        assert!(policy.may_rename_category(&uid("owner"), &category));
        assert!(policy.may_rename_category(&uid("admin"), &category));
        assert!(!policy.may_rename_category(&uid("collab"), &category));
    }
}

//! Tests for the list registry service.

use std::sync::Arc;

use rstest::rstest;

use super::*;
use crate::domain::ports::{
    IdentityGatewayError, ItemRepositoryError, MockCategoryDirectory, MockIdentityGateway,
    MockItemRepository, MockListRepository,
};
use crate::domain::{CategoryId, ErrorCode};

fn uid(raw: &str) -> Uid {
    Uid::new(raw).expect("uid")
}

struct Mocks {
    lists: MockListRepository,
    items: MockItemRepository,
    categories: MockCategoryDirectory,
    identity: MockIdentityGateway,
}

impl Mocks {
    fn new() -> Self {
        Self {
            lists: MockListRepository::new(),
            items: MockItemRepository::new(),
            categories: MockCategoryDirectory::new(),
            identity: MockIdentityGateway::new(),
        }
    }

    fn with_list(mut self, list: SharedList) -> Self {
        self.lists
            .expect_find_by_id()
            .returning(move |_| Ok(Some(list.clone())));
        self
    }

    fn build(self) -> ListRegistryService<MockListRepository, MockItemRepository> {
        ListRegistryService::new(
            Arc::new(self.lists),
            Arc::new(self.items),
            Arc::new(self.categories),
            Arc::new(self.identity),
            Arc::new(AccessPolicy::new(uid("admin"))),
        )
    }
}

fn owned_list(is_public: bool) -> SharedList {
    SharedList::new("Films".into(), CategoryId::random(), uid("owner"), is_public)
}

#[rstest]
#[tokio::test]
async fn create_resolves_category_by_name_and_defaults_blank_to_other() {
    let mut mocks = Mocks::new();
    let other = Category::new_public("Other", uid("owner"));
    let other_id = other.id;
    mocks
        .categories
        .expect_resolve_or_create()
        .withf(|name, _| name == "Other")
        .times(1)
        .return_once(move |_, _| Ok(other));
    mocks.lists.expect_insert().times(1).return_once(|_| Ok(()));

    let list = mocks
        .build()
        .create(
            NewList {
                title: "  Weekend  ".into(),
                category: CategoryRef::Name("   ".into()),
                is_public: false,
            },
            &uid("owner"),
        )
        .await
        .expect("created");

    assert_eq!(list.title, "Weekend");
    assert_eq!(list.category_id, other_id);
    assert!(list.collaborators.is_empty());
}

#[rstest]
#[tokio::test]
async fn create_with_unknown_category_id_is_not_found() {
    let mut mocks = Mocks::new();
    mocks
        .categories
        .expect_find()
        .times(1)
        .return_once(|_| Ok(None));
    mocks.lists.expect_insert().times(0);

    let err = mocks
        .build()
        .create(
            NewList {
                title: "Weekend".into(),
                category: CategoryRef::Id(CategoryId::random()),
                is_public: true,
            },
            &uid("owner"),
        )
        .await
        .expect_err("not found");

    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn create_rejects_blank_title_before_touching_categories() {
    let mocks = Mocks::new();

    let err = mocks
        .build()
        .create(
            NewList {
                title: " ".into(),
                category: CategoryRef::Name("Movies".into()),
                is_public: true,
            },
            &uid("owner"),
        )
        .await
        .expect_err("invalid");

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
}

#[rstest]
#[case("admin")]
#[case("collab")]
#[tokio::test]
async fn update_is_owner_only(#[case] actor: &str) {
    let mut list = owned_list(true);
    list.collaborators.insert(uid("collab"));
    let mut mocks = Mocks::new().with_list(list.clone());
    mocks.lists.expect_update_metadata().times(0);

    let err = mocks
        .build()
        .update(&list.id, ListPatch::default(), &uid(actor))
        .await
        .expect_err("forbidden");

    assert_eq!(err.code(), ErrorCode::Forbidden);
}

#[rstest]
#[tokio::test]
async fn update_persists_patched_metadata() {
    let list = owned_list(false);
    let mut mocks = Mocks::new().with_list(list.clone());
    mocks
        .lists
        .expect_update_metadata()
        .withf(|stored| stored.title == "Films 2025" && stored.is_public)
        .times(1)
        .returning(|stored| Ok(Some(stored.clone())));

    let updated = mocks
        .build()
        .update(
            &list.id,
            ListPatch {
                title: Some(" Films 2025 ".into()),
                category_id: None,
                is_public: Some(true),
            },
            &uid("owner"),
        )
        .await
        .expect("updated");

    assert_eq!(updated.owner_uid, uid("owner"));
}

#[rstest]
#[tokio::test]
async fn update_unknown_list_is_not_found() {
    let mut mocks = Mocks::new();
    mocks
        .lists
        .expect_find_by_id()
        .times(1)
        .return_once(|_| Ok(None));

    let err = mocks
        .build()
        .update(&ListId::random(), ListPatch::default(), &uid("owner"))
        .await
        .expect_err("not found");

    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn owner_cannot_delete_list_with_foreign_items() {
    let list = owned_list(false);
    let mut mocks = Mocks::new().with_list(list.clone());
    mocks
        .items
        .expect_count_foreign()
        .times(1)
        .return_once(|_, _| Ok(1));
    mocks.items.expect_delete_by_list().times(0);
    mocks.lists.expect_delete().times(0);

    let err = mocks
        .build()
        .delete(&list.id, &uid("owner"))
        .await
        .expect_err("forbidden");

    assert_eq!(err.code(), ErrorCode::Forbidden);
}

#[rstest]
#[tokio::test]
async fn admin_deletes_public_list_and_cascades_items() {
    let list = owned_list(true);
    let mut mocks = Mocks::new().with_list(list.clone());
    mocks
        .items
        .expect_delete_by_list()
        .times(1)
        .return_once(|_| Ok(4));
    mocks.lists.expect_delete().times(1).return_once(|_| Ok(true));

    mocks
        .build()
        .delete(&list.id, &uid("admin"))
        .await
        .expect("deleted");
}

#[rstest]
#[tokio::test]
async fn admin_cannot_delete_private_list() {
    let list = owned_list(false);
    let mut mocks = Mocks::new().with_list(list.clone());
    mocks.items.expect_delete_by_list().times(0);

    let err = mocks
        .build()
        .delete(&list.id, &uid("admin"))
        .await
        .expect_err("forbidden");

    assert_eq!(err.code(), ErrorCode::Forbidden);
}

#[rstest]
#[tokio::test]
async fn failed_item_cascade_keeps_the_list() {
    let list = owned_list(false);
    let mut mocks = Mocks::new().with_list(list.clone());
    mocks
        .items
        .expect_count_foreign()
        .times(1)
        .return_once(|_, _| Ok(0));
    mocks
        .items
        .expect_delete_by_list()
        .times(1)
        .return_once(|_| Err(ItemRepositoryError::query("disk full")));
    mocks.lists.expect_delete().times(0);

    let err = mocks
        .build()
        .delete(&list.id, &uid("owner"))
        .await
        .expect_err("cascade failure surfaces");

    assert_eq!(err.code(), ErrorCode::InternalError);
}

#[rstest]
#[tokio::test]
async fn add_collaborator_by_email_resolves_uid() {
    let list = owned_list(false);
    let mut shared = list.clone();
    shared.collaborators.insert(uid("bob"));
    let mut mocks = Mocks::new().with_list(list.clone());
    mocks
        .identity
        .expect_get_user_by_email()
        .withf(|email| email == "bob@mail.test")
        .times(1)
        .return_once(|_| Ok(Uid::new("bob").expect("uid")));
    mocks
        .lists
        .expect_add_collaborator()
        .withf(|_, target| target.as_ref() == "bob")
        .times(1)
        .return_once(move |_, _| Ok(Some(shared)));

    let updated = mocks
        .build()
        .add_collaborator(
            &list.id,
            &uid("owner"),
            CollaboratorRef::Email(" bob@mail.test ".into()),
        )
        .await
        .expect("added");

    assert!(updated.collaborators.contains(&uid("bob")));
}

#[rstest]
#[case(IdentityGatewayError::not_found("nobody"), ErrorCode::InvalidRequest)]
#[case(IdentityGatewayError::unavailable("timeout"), ErrorCode::ServiceUnavailable)]
#[tokio::test]
async fn email_resolution_failures_are_surfaced(
    #[case] failure: IdentityGatewayError,
    #[case] expected: ErrorCode,
) {
    let list = owned_list(false);
    let mut mocks = Mocks::new().with_list(list.clone());
    mocks
        .identity
        .expect_get_user_by_email()
        .times(1)
        .return_once(move |_| Err(failure));
    mocks.lists.expect_add_collaborator().times(0);

    let err = mocks
        .build()
        .add_collaborator(
            &list.id,
            &uid("owner"),
            CollaboratorRef::Email("ghost@mail.test".into()),
        )
        .await
        .expect_err("surfaced");

    assert_eq!(err.code(), expected);
}

#[rstest]
#[tokio::test]
async fn owner_cannot_be_added_as_collaborator() {
    let list = owned_list(false);
    let mut mocks = Mocks::new().with_list(list.clone());
    mocks.lists.expect_add_collaborator().times(0);

    let err = mocks
        .build()
        .add_collaborator(&list.id, &uid("owner"), CollaboratorRef::Uid(uid("owner")))
        .await
        .expect_err("invalid");

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
}

#[rstest]
#[tokio::test]
async fn collaborators_cannot_manage_collaborators() {
    let mut list = owned_list(false);
    list.collaborators.insert(uid("collab"));
    let mocks = Mocks::new().with_list(list.clone());

    let err = mocks
        .build()
        .remove_collaborator(&list.id, &uid("collab"), &uid("collab"))
        .await
        .expect_err("forbidden");

    assert_eq!(err.code(), ErrorCode::Forbidden);
}

#[rstest]
#[case("owner", true)]
#[case("admin", true)]
#[case("collab", true)]
#[case("stranger", false)]
#[tokio::test]
async fn can_edit_follows_policy(#[case] who: &str, #[case] expected: bool) {
    let mut list = owned_list(false);
    list.collaborators.insert(uid("collab"));
    let mocks = Mocks::new().with_list(list.clone());

    let allowed = mocks
        .build()
        .can_edit(&uid(who), &list.id)
        .await
        .expect("checked");

    assert_eq!(allowed, expected);
}

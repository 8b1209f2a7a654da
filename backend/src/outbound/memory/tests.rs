//! Behavioural tests for the in-memory document store.

use std::sync::Arc;

use futures_util::future::join_all;
use rstest::{fixture, rstest};

use super::MemoryStore;
use crate::domain::ports::{
    CategoryRepository, CategoryRepositoryError, ItemRepository, ListRepository,
    UserPreferencesRepository,
};
use crate::domain::{Category, CategoryId, Item, SharedList, Uid, UserPreferences};

fn uid(raw: &str) -> Uid {
    Uid::new(raw).expect("valid uid")
}

#[fixture]
fn store() -> Arc<MemoryStore> {
    Arc::new(MemoryStore::new())
}

fn list_for(owner: &str, is_public: bool) -> SharedList {
    SharedList::new("Weekend".to_owned(), CategoryId::random(), uid(owner), is_public)
}

#[rstest]
#[tokio::test]
async fn category_names_collide_ignoring_case(store: Arc<MemoryStore>) {
    CategoryRepository::insert(store.as_ref(), &Category::new_public("Movies", uid("admin")))
        .await
        .expect("first insert");

    let err = CategoryRepository::insert(store.as_ref(), &Category::new_public("mOVIES", uid("bob")))
        .await
        .expect_err("duplicate name");

    assert!(matches!(err, CategoryRepositoryError::DuplicateName { .. }));
    let found = store.find_by_name("movies").await.expect("lookup");
    assert_eq!(found.map(|c| c.name), Some("Movies".to_owned()));
}

#[rstest]
#[tokio::test]
async fn renaming_onto_another_name_is_rejected(store: Arc<MemoryStore>) {
    let movies = Category::new_public("Movies", uid("admin"));
    let novels = Category::new_public("Novels", uid("admin"));
    CategoryRepository::insert(store.as_ref(), &movies)
        .await
        .expect("insert movies");
    CategoryRepository::insert(store.as_ref(), &novels)
        .await
        .expect("insert novels");

    let err = store
        .rename(&novels.id, "MOVIES")
        .await
        .expect_err("collision");
    assert!(matches!(err, CategoryRepositoryError::DuplicateName { .. }));

    let recased = store
        .rename(&movies.id, "MOVIES")
        .await
        .expect("own name may change case");
    assert_eq!(recased.map(|c| c.name), Some("MOVIES".to_owned()));
}

#[rstest]
#[tokio::test]
async fn concurrent_tag_appends_keep_every_distinct_tag(store: Arc<MemoryStore>) {
    let category = Category::new_public("Groceries", uid("admin"));
    CategoryRepository::insert(store.as_ref(), &category)
        .await
        .expect("insert");

    let tags = ["Dairy", "dairy", "Produce", "Bakery", "PRODUCE"];
    join_all(tags.iter().map(|tag| {
        let store = Arc::clone(&store);
        let id = category.id;
        async move { store.append_tag_if_absent(&id, tag).await }
    }))
    .await;

    let stored = CategoryRepository::find_by_id(store.as_ref(), &category.id)
        .await
        .expect("lookup")
        .expect("category exists");
    assert_eq!(stored.sub_category_tags.len(), 3);
    assert!(stored.sub_category_tags.contains("bakery"));
}

#[rstest]
#[tokio::test]
async fn concurrent_done_toggles_do_not_lose_updates(store: Arc<MemoryStore>) {
    let list = list_for("alice", false);
    let item = Item::new(list.id, "Milk".to_owned(), "Misc".to_owned(), uid("alice"));
    ItemRepository::insert(store.as_ref(), &item)
        .await
        .expect("insert item");

    let users: Vec<Uid> = (0..16).map(|n| uid(&format!("user-{n}"))).collect();
    join_all(users.iter().map(|user| {
        let store = Arc::clone(&store);
        let id = item.id;
        async move { store.set_done(&id, user, true).await }
    }))
    .await;

    let stored = ItemRepository::find_by_id(store.as_ref(), &item.id)
        .await
        .expect("lookup")
        .expect("item exists");
    assert_eq!(stored.done_by.len(), users.len());
}

#[rstest]
#[tokio::test]
async fn metadata_updates_leave_collaborators_alone(store: Arc<MemoryStore>) {
    let mut list = list_for("alice", false);
    ListRepository::insert(store.as_ref(), &list)
        .await
        .expect("insert");
    store
        .add_collaborator(&list.id, &uid("bob"))
        .await
        .expect("add collaborator");

    list.title = "Renamed".to_owned();
    let updated = store
        .update_metadata(&list)
        .await
        .expect("update")
        .expect("list exists");

    assert_eq!(updated.title, "Renamed");
    assert!(updated.collaborators.contains(&uid("bob")));
}

#[rstest]
#[tokio::test]
async fn visible_lists_are_newest_first_and_filtered(store: Arc<MemoryStore>) {
    let private = list_for("alice", false);
    let public = list_for("carol", true);
    ListRepository::insert(store.as_ref(), &private)
        .await
        .expect("insert private");
    ListRepository::insert(store.as_ref(), &public)
        .await
        .expect("insert public");

    let anonymous = store.list_visible_to(None).await.expect("anonymous");
    assert_eq!(anonymous, vec![public.clone()]);

    let alice = store
        .list_visible_to(Some(uid("alice")))
        .await
        .expect("alice");
    assert_eq!(
        alice.iter().map(|l| l.id).collect::<Vec<_>>(),
        vec![public.id, private.id]
    );
}

#[rstest]
#[tokio::test]
async fn foreign_items_are_counted_and_cascade_deleted(store: Arc<MemoryStore>) {
    let list = list_for("alice", false);
    for (text, author) in [("Milk", "alice"), ("Eggs", "bob"), ("Jam", "carol")] {
        let item = Item::new(list.id, text.to_owned(), "Misc".to_owned(), uid(author));
        ItemRepository::insert(store.as_ref(), &item)
            .await
            .expect("insert item");
    }

    let foreign = store
        .count_foreign(&list.id, &uid("alice"))
        .await
        .expect("count");
    assert_eq!(foreign, 2);

    let removed = store.delete_by_list(&list.id).await.expect("cascade");
    assert_eq!(removed, 3);
    assert!(store.list_by_list(&list.id).await.expect("list").is_empty());
}

#[rstest]
#[tokio::test]
async fn preferences_saves_replace_previous_values(store: Arc<MemoryStore>) {
    let alice = uid("alice");
    store
        .save(&UserPreferences::new(alice.clone(), false))
        .await
        .expect("first save");
    store
        .save(&UserPreferences::new(alice.clone(), true))
        .await
        .expect("second save");

    let stored = store
        .find_by_uid(&alice)
        .await
        .expect("lookup")
        .expect("preferences exist");
    assert!(stored.show_public);
}

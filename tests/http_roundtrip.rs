//! End-to-end: components over HTTP against the in-memory backend
//!
//! Each test spawns its own backend on an ephemeral port, so tests run in
//! parallel without sharing state.

use std::sync::Arc;

use pedigree::mock_backend::{MockBackend, MockServerConfig, MockStore};
use pedigree::types::{HorseSearchFilter, OwnerSearchFilter, Sex};
use pedigree::ui::{FixedAnswer, NavigationHistory, NotificationKind, NotificationLog};
use pedigree::{
    AppContext, ClientConfig, FamilyTree, HorseApi, HorseForm, HorseList, HttpClient, OwnerApi,
    OwnerForm, QueryState, ReferenceField, Route,
};

struct Session {
    client: Arc<HttpClient>,
    notes: Arc<NotificationLog>,
    nav: Arc<NavigationHistory>,
    ctx: AppContext,
}

async fn start_backend(store: MockStore) -> Session {
    let (addr, _handle) = MockBackend::with_store(MockServerConfig::ephemeral(), store)
        .spawn()
        .await
        .unwrap();

    let config = ClientConfig::with_backend_url(format!("http://{}", addr)).unwrap();
    let client = Arc::new(HttpClient::new(&config).unwrap());
    let notes = Arc::new(NotificationLog::new());
    let nav = Arc::new(NavigationHistory::new());
    let ctx = AppContext::new(
        client.clone(),
        client.clone(),
        notes.clone(),
        Arc::new(FixedAnswer(true)),
        nav.clone(),
        config,
    );
    Session {
        client,
        notes,
        nav,
        ctx,
    }
}

fn date(y: i32, m: u32, d: u32) -> chrono::NaiveDate {
    chrono::NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[tokio::test]
async fn test_create_owner_then_horse_with_references() {
    let s = start_backend(MockStore::with_sample_data()).await;

    let mut owner_form = OwnerForm::new(s.ctx.clone());
    owner_form.set_first_name("Maria");
    owner_form.set_last_name("Lang");
    owner_form.set_email("maria@lang.at");
    let maria = owner_form.submit().await.unwrap();
    assert!(maria.id.is_some());

    let mut form = HorseForm::open(s.ctx.clone(), &Route::HorseCreate).await.unwrap();
    form.set_name("Thunder");
    form.set_date_of_birth(Some(date(2021, 4, 4)));
    form.set_sex(Some(Sex::Male));

    form.input(ReferenceField::Owner, "Maria");
    assert!(form.settle(ReferenceField::Owner).await);
    let owner = form.owner().suggestions()[0].clone();
    form.select_owner(owner);

    form.input(ReferenceField::Mother, "Wen");
    assert!(form.settle(ReferenceField::Mother).await);
    let mother = form.mother().suggestions()[0].clone();
    assert_eq!(mother.name, "Wendy");
    form.select_mother(mother);

    let created = form.submit().await.unwrap();
    assert_eq!(created.owner.as_ref().map(|o| o.full_name()).as_deref(), Some("Maria Lang"));
    assert_eq!(created.mother.as_ref().map(|m| m.name.as_str()), Some("Wendy"));
    assert_eq!(s.nav.current(), Some(Route::Horses));

    let fetched = s.client.get_by_id(created.id.unwrap()).await.unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_backend_validation_errors_are_listed() {
    let s = start_backend(MockStore::with_sample_data()).await;
    let mut form = HorseForm::open(s.ctx.clone(), &Route::HorseEdit { id: 2 })
        .await
        .unwrap();
    // Storm already sired foals
    form.set_sex(Some(Sex::Female));

    assert!(form.submit().await.is_err());
    let note = s.notes.last().unwrap();
    assert_eq!(note.kind, NotificationKind::Error);
    assert_eq!(note.title, "Horse could not be edited");
    assert!(note
        .body
        .starts_with("Conflict arose while trying to update horse data\n\n- Cannot change the sex"));
}

#[tokio::test]
async fn test_ancestor_cycle_is_rejected() {
    let s = start_backend(MockStore::with_sample_data()).await;
    // Old Mare (1) is Wendy's (3) mother; Wendy cannot become hers
    let wendy = s.client.get_by_id(3).await.unwrap();
    let mut form = HorseForm::open(s.ctx.clone(), &Route::HorseEdit { id: 1 })
        .await
        .unwrap();
    form.select_mother(wendy.to_minimal().unwrap());

    assert!(form.submit().await.is_err());
    assert!(s
        .notes
        .last()
        .unwrap()
        .body
        .contains("A horse cannot be its own ancestor"));
}

#[tokio::test]
async fn test_family_tree_limit_over_http() {
    let s = start_backend(MockStore::with_sample_data()).await;
    let thunderbolt = HorseApi::search(
        s.client.as_ref(),
        &HorseSearchFilter {
            name: Some("Thunderbolt".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .remove(0);
    let id = thunderbolt.id.unwrap();

    let mut tree = FamilyTree::open(s.ctx.clone(), id, &QueryState::with_limit(2))
        .await
        .unwrap();
    assert_eq!(tree.root().unwrap().depth(), 2);

    tree.submit_limit(3).unwrap();
    let route = s.nav.current().unwrap();
    assert!(tree.on_query_change(&route).await.unwrap());
    assert_eq!(tree.root().unwrap().depth(), 3);
}

#[tokio::test]
async fn test_delete_clears_parent_references() {
    let s = start_backend(MockStore::with_sample_data()).await;
    let mut list = HorseList::open(s.ctx.clone()).await;
    let storm = list
        .horses()
        .iter()
        .find(|h| h.name == "Storm")
        .and_then(|h| h.id)
        .unwrap();

    assert!(list.delete(storm).await.unwrap());
    assert!(!list.horses().iter().any(|h| h.name == "Storm"));

    let children = HorseApi::search(s.client.as_ref(), &HorseSearchFilter::default())
        .await
        .unwrap();
    for child in children {
        let detail = s.client.get_by_id(child.id.unwrap()).await.unwrap();
        assert_ne!(detail.father_id(), Some(storm));
    }
}

#[tokio::test]
async fn test_owner_search_is_limited() {
    let s = start_backend(MockStore::with_sample_data()).await;
    let owners = OwnerApi::search(
        s.client.as_ref(),
        &OwnerSearchFilter {
            full_name_substring: Some("a".into()),
            max_result_count: Some(1),
        },
    )
    .await
    .unwrap();
    assert_eq!(owners.len(), 1);
}

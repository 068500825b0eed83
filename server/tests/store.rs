mod common;

use chrono::NaiveDate;

use common::test_store;
use server::{
    schemas::{EmployeeCreate, EmployeeUpdate},
    store::StoreError,
};

fn new_employee(name: &str, email: &str) -> EmployeeCreate {
    EmployeeCreate {
        name: name.into(),
        email: email.into(),
        phone: None,
        department: None,
        position: None,
        salary: None,
        hire_date: None,
    }
}

#[tokio::test]
async fn create_persists_and_assigns_ids() {
    let store = test_store().await;
    let first = store.create(new_employee("A", "a@x.com")).await.unwrap();
    let second = store.create(new_employee("B", "b@x.com")).await.unwrap();
    assert!(second.id > first.id);
    assert_eq!(first.created_at, first.updated_at);

    let fetched = store.get(first.id).await.unwrap().unwrap();
    assert_eq!(fetched, first);
}

#[tokio::test]
async fn duplicate_email_surfaces_as_typed_conflict() {
    let store = test_store().await;
    store.create(new_employee("A", "dup@x.com")).await.unwrap();
    let err = store
        .create(new_employee("B", "dup@x.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Conflict));
}

#[tokio::test]
async fn get_missing_row_is_none() {
    let store = test_store().await;
    assert!(store.get(123).await.unwrap().is_none());
}

#[tokio::test]
async fn update_applies_only_present_fields() {
    let store = test_store().await;
    let mut input = new_employee("A", "a@x.com");
    input.department = Some("X".into());
    input.salary = Some(50_000.0);
    let created = store.create(input).await.unwrap();

    let changes = EmployeeUpdate {
        department: Some("Y".into()),
        hire_date: NaiveDate::from_ymd_opt(2024, 6, 1),
        ..EmployeeUpdate::default()
    };
    let updated = store.update(created.id, changes).await.unwrap().unwrap();
    assert_eq!(updated.name, "A");
    assert_eq!(updated.email, "a@x.com");
    assert_eq!(updated.department.as_deref(), Some("Y"));
    assert_eq!(updated.salary, Some(50_000.0));
    assert_eq!(updated.hire_date, NaiveDate::from_ymd_opt(2024, 6, 1));
    assert!(updated.updated_at >= created.updated_at);
}

#[tokio::test]
async fn empty_update_returns_current_row_unchanged() {
    let store = test_store().await;
    let created = store.create(new_employee("A", "a@x.com")).await.unwrap();
    let unchanged = store
        .update(created.id, EmployeeUpdate::default())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(unchanged, created);
}

#[tokio::test]
async fn update_missing_row_is_none() {
    let store = test_store().await;
    let changes = EmployeeUpdate {
        name: Some("Ghost".into()),
        ..EmployeeUpdate::default()
    };
    assert!(store.update(404, changes).await.unwrap().is_none());
}

#[tokio::test]
async fn update_to_taken_email_is_conflict() {
    let store = test_store().await;
    store.create(new_employee("A", "a@x.com")).await.unwrap();
    let second = store.create(new_employee("B", "b@x.com")).await.unwrap();

    let changes = EmployeeUpdate {
        email: Some("a@x.com".into()),
        ..EmployeeUpdate::default()
    };
    let err = store.update(second.id, changes).await.unwrap_err();
    assert!(matches!(err, StoreError::Conflict));
}

#[tokio::test]
async fn delete_reports_whether_a_row_was_removed() {
    let store = test_store().await;
    let created = store.create(new_employee("A", "a@x.com")).await.unwrap();
    assert!(store.delete(created.id).await.unwrap());
    assert!(!store.delete(created.id).await.unwrap());
    assert!(store.get(created.id).await.unwrap().is_none());
}

#[tokio::test]
async fn list_is_id_descending() {
    let store = test_store().await;
    for (name, email) in [("A", "a@x.com"), ("B", "b@x.com"), ("C", "c@x.com")] {
        store.create(new_employee(name, email)).await.unwrap();
    }
    let all = store.list().await.unwrap();
    assert_eq!(all.len(), 3);
    assert!(all.windows(2).all(|pair| pair[0].id > pair[1].id));
}

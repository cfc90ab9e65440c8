use actor_framework::mock::MockClient;
use actor_framework::FrameworkError;
use magazine_gateway::category_store::CategoryError;
use magazine_gateway::clients::CategoryStoreClient;
use magazine_gateway::commander::{CategoryCommander, CommanderContext};
use magazine_gateway::model::{Category, CategoryCreate, CategoryId, CategoryUpdate};

fn category(id: u32, parent: Option<u32>) -> Category {
    Category::new(CategoryId(id), format!("Section {id}")).with_parent(parent.map(CategoryId))
}

/// Commander checks run against a mock store; every store call is an expectation.
#[tokio::test]
async fn test_create_under_missing_parent_is_rejected() {
    let mut mock = MockClient::<Category>::new();
    mock.expect_get(CategoryId(9)).return_ok(None);
    let ctx = CommanderContext::new(CategoryStoreClient::new(mock.client()));

    let params = CategoryCreate::new("Sports").under(CategoryId(9));
    let result = CategoryCommander::create(&ctx, params).await;

    assert_eq!(result, Err(CategoryError::ParentNotFound(CategoryId(9))));
    mock.verify();
}

#[tokio::test]
async fn test_create_normalizes_name_before_storing() {
    let mut mock = MockClient::<Category>::new();
    mock.expect_get(CategoryId(1)).return_ok(Some(category(1, None)));
    mock.expect_create().return_ok(CategoryId(2));
    mock.expect_get(CategoryId(2))
        .return_ok(Some(Category::new(CategoryId(2), "Football").with_parent(Some(CategoryId(1)))));
    let ctx = CommanderContext::new(CategoryStoreClient::new(mock.client()));

    let params = CategoryCreate::new("  Football ").under(CategoryId(1));
    let created = CategoryCommander::create(&ctx, params).await.unwrap();

    assert_eq!(created.id, CategoryId(2));
    assert_eq!(created.parent_id, Some(CategoryId(1)));
    mock.verify();
}

#[tokio::test]
async fn test_blank_name_never_reaches_the_store() {
    let mock = MockClient::<Category>::new();
    let ctx = CommanderContext::new(CategoryStoreClient::new(mock.client()));

    let result = CategoryCommander::create(&ctx, CategoryCreate::new("   ")).await;

    assert!(matches!(result, Err(CategoryError::ValidationError(_))));
    mock.verify();
}

#[tokio::test]
async fn test_move_under_own_descendant_is_rejected() {
    // 1 -> 2 -> 3; moving 1 under 3 would close a loop.
    let mut mock = MockClient::<Category>::new();
    mock.expect_get(CategoryId(1)).return_ok(Some(category(1, None)));
    mock.expect_get(CategoryId(3)).return_ok(Some(category(3, Some(2))));
    mock.expect_list()
        .return_ok(vec![category(1, None), category(2, Some(1)), category(3, Some(2))]);
    let ctx = CommanderContext::new(CategoryStoreClient::new(mock.client()));

    let update = CategoryUpdate {
        parent_id: Some(Some(CategoryId(3))),
        ..Default::default()
    };
    let result = CategoryCommander::update(&ctx, CategoryId(1), update).await;

    assert_eq!(
        result,
        Err(CategoryError::CyclicParent {
            id: CategoryId(1),
            parent: CategoryId(3)
        })
    );
    mock.verify();
}

#[tokio::test]
async fn test_move_under_itself_is_rejected() {
    let mut mock = MockClient::<Category>::new();
    mock.expect_get(CategoryId(4)).return_ok(Some(category(4, None)));
    let ctx = CommanderContext::new(CategoryStoreClient::new(mock.client()));

    let update = CategoryUpdate {
        parent_id: Some(Some(CategoryId(4))),
        ..Default::default()
    };
    let result = CategoryCommander::update(&ctx, CategoryId(4), update).await;

    assert!(matches!(result, Err(CategoryError::CyclicParent { .. })));
    mock.verify();
}

#[tokio::test]
async fn test_update_unknown_category() {
    let mut mock = MockClient::<Category>::new();
    mock.expect_get(CategoryId(5)).return_ok(None);
    let ctx = CommanderContext::new(CategoryStoreClient::new(mock.client()));

    let result =
        CategoryCommander::update(&ctx, CategoryId(5), CategoryUpdate::default()).await;

    assert_eq!(result, Err(CategoryError::NotFound("category_5".to_string())));
    mock.verify();
}

#[tokio::test]
async fn test_delete_with_children_is_rejected() {
    let mut mock = MockClient::<Category>::new();
    mock.expect_get(CategoryId(1)).return_ok(Some(category(1, None)));
    mock.expect_list().return_ok(vec![
        category(1, None),
        category(2, Some(1)),
        category(3, Some(1)),
    ]);
    let ctx = CommanderContext::new(CategoryStoreClient::new(mock.client()));

    let result = CategoryCommander::delete(&ctx, CategoryId(1)).await;

    assert_eq!(
        result,
        Err(CategoryError::HasChildren {
            id: CategoryId(1),
            children: 2
        })
    );
    mock.verify();
}

#[tokio::test]
async fn test_delete_leaf() {
    let mut mock = MockClient::<Category>::new();
    mock.expect_get(CategoryId(2)).return_ok(Some(category(2, Some(1))));
    mock.expect_list().return_ok(vec![category(1, None), category(2, Some(1))]);
    mock.expect_delete(CategoryId(2)).return_ok(());
    let ctx = CommanderContext::new(CategoryStoreClient::new(mock.client()));

    CategoryCommander::delete(&ctx, CategoryId(2)).await.unwrap();
    mock.verify();
}

#[tokio::test]
async fn test_closed_store_reports_unavailable() {
    let mut mock = MockClient::<Category>::new();
    mock.expect_get(CategoryId(1)).return_err(FrameworkError::ActorClosed);
    let ctx = CommanderContext::new(CategoryStoreClient::new(mock.client()));

    let result = CategoryCommander::delete(&ctx, CategoryId(1)).await;

    assert!(matches!(result, Err(CategoryError::Unavailable(_))));
    mock.verify();
}

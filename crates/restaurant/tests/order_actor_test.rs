use chrono::Utc;
use resource_actor::mock::MockClient;
use resource_actor::{ActorClient, FrameworkError};
use restaurant::admin_actor::{self, AuthError, SessionFilter};
use restaurant::clients::{AdminClient, OrderClient};
use restaurant::config::AdminSettings;
use restaurant::feed::{OrderEvent, OrderFeed};
use restaurant::model::{
    AdminCredential, OrderCreate, OrderFilter, OrderInfo, OrderStatus, OrderType, SessionCreate,
    StatusAction, ADMIN_KEY,
};
use restaurant::order_actor::OrderError;
use restaurant::password::hash_password;

fn settings() -> AdminSettings {
    AdminSettings {
        pbkdf2_iterations: 1_000,
        ..AdminSettings::default()
    }
}

fn table(total: f64) -> OrderCreate {
    OrderCreate {
        order_info: OrderInfo::table("4"),
        items: vec![],
        total,
    }
}

/// Real Order actor with the feed injected as its context.
/// Every change the store applies is published in order.
#[tokio::test]
async fn test_order_actor_publishes_changes() {
    let feed = OrderFeed::new(16);
    let mut events = feed.subscribe();

    let (order_actor, order_generic_client) = restaurant::order_actor::new(8);
    let order_client = OrderClient::new(order_generic_client);
    let actor_handle = tokio::spawn(order_actor.run(feed.clone()));

    let order = order_client.place_order(table(1250.0)).await.unwrap();
    assert_eq!(order.status, OrderStatus::Received);
    assert_eq!(order.order_type(), OrderType::Table);

    let accepted = order_client
        .advance(order.id.clone(), StatusAction::Accept)
        .await
        .unwrap();
    assert_eq!(accepted.status, OrderStatus::Accepted);

    // Cancel is only offered while received
    let refused = order_client
        .advance(order.id.clone(), StatusAction::Cancel)
        .await;
    assert_eq!(
        refused,
        Err(OrderError::InvalidTransition {
            id: order.id.clone(),
            status: OrderStatus::Accepted,
            action: StatusAction::Cancel,
        })
    );

    let cancelled = order_client
        .update_status(order.id.clone(), OrderStatus::Cancelled)
        .await
        .unwrap();
    assert_eq!(cancelled.status, OrderStatus::Cancelled);

    order_client.delete(order.id.clone()).await.unwrap();

    assert_eq!(events.recv().await.unwrap(), OrderEvent::Placed { order: order.clone() });
    assert_eq!(
        events.recv().await.unwrap(),
        OrderEvent::StatusChanged {
            id: order.id.clone(),
            from: OrderStatus::Received,
            to: OrderStatus::Accepted,
        }
    );
    // The refused action published nothing
    assert_eq!(
        events.recv().await.unwrap(),
        OrderEvent::StatusChanged {
            id: order.id.clone(),
            from: OrderStatus::Accepted,
            to: OrderStatus::Cancelled,
        }
    );
    assert_eq!(events.recv().await.unwrap(), OrderEvent::Deleted { id: order.id.clone() });

    drop(order_client);
    actor_handle.await.unwrap();
}

#[tokio::test]
async fn test_order_actor_rejects_invalid_orders() {
    let feed = OrderFeed::new(16);
    let mut events = feed.subscribe();
    let (order_actor, order_generic_client) = restaurant::order_actor::new(8);
    let order_client = OrderClient::new(order_generic_client);
    let actor_handle = tokio::spawn(order_actor.run(feed));

    let result = order_client
        .place_order(OrderCreate {
            order_info: OrderInfo::delivery("Sam", "", "12 rue Haute"),
            items: vec![],
            total: 800.0,
        })
        .await;
    assert!(matches!(result, Err(OrderError::ValidationError(msg)) if msg.contains("phone")));

    let result = order_client.place_order(table(f64::NAN)).await;
    assert!(matches!(result, Err(OrderError::ValidationError(_))));

    let missing = order_client
        .advance("order_0_missing".to_string(), StatusAction::Accept)
        .await;
    assert!(matches!(missing, Err(OrderError::NotFound(_))));

    assert!(order_client.list(OrderFilter::all()).await.unwrap().is_empty());
    assert!(events.try_recv().is_err());

    drop(order_client);
    actor_handle.await.unwrap();
}

#[tokio::test]
async fn test_order_stats_count_pending_orders() {
    let (order_actor, order_generic_client) = restaurant::order_actor::new(8);
    let order_client = OrderClient::new(order_generic_client);
    let actor_handle = tokio::spawn(order_actor.run(OrderFeed::new(4)));
    let since = Utc::now() - chrono::Duration::minutes(1);

    let first = order_client.place_order(table(1000.0)).await.unwrap();
    order_client.place_order(table(500.0)).await.unwrap();
    order_client
        .update_status(first.id, OrderStatus::Served)
        .await
        .unwrap();

    let stats = order_client.stats(since).await.unwrap();
    assert_eq!(stats.total_orders, 2);
    assert_eq!(stats.total_revenue, 1500.0);
    assert_eq!(stats.average_order_value, 750.0);
    assert_eq!(stats.pending_orders, 1);

    let later = order_client.stats(Utc::now() + chrono::Duration::minutes(1)).await.unwrap();
    assert_eq!(later.total_orders, 0);
    assert_eq!(later.average_order_value, 0.0);

    drop(order_client);
    actor_handle.await.unwrap();
}

/// Real Session actor with a mocked credential store.
/// Login verifies against the mocked hash and issues a session from the real actor.
#[tokio::test]
async fn test_admin_login_with_mocked_credentials() {
    let mut credential_mock = MockClient::<AdminCredential>::new();
    let now = Utc::now();
    let credential = AdminCredential {
        id: ADMIN_KEY.to_string(),
        password_hash: hash_password("letmein", 1_000).unwrap(),
        configured_at: now,
        updated_at: now,
    };
    credential_mock
        .expect_get(ADMIN_KEY.to_string())
        .return_ok(Some(credential.clone()));
    credential_mock
        .expect_get(ADMIN_KEY.to_string())
        .return_ok(Some(credential));

    let (session_actor, sessions) = admin_actor::new_sessions(8);
    let session_handle = tokio::spawn(session_actor.run(()));
    let admin = AdminClient::new(credential_mock.client(), sessions, settings());

    assert_eq!(admin.login("wrong!").await, Err(AuthError::InvalidCredentials));

    let session = admin.login("letmein").await.unwrap();
    assert!(session.expires_at > session.issued_at);
    assert_eq!(admin.validate_session(&session.token).await.unwrap(), session);

    admin.logout(&session.token).await.unwrap();
    assert_eq!(
        admin.validate_session(&session.token).await,
        Err(AuthError::InvalidSession)
    );
    assert_eq!(admin.logout(&session.token).await, Err(AuthError::InvalidSession));

    credential_mock.verify();
    drop(admin);
    drop(credential_mock);
    session_handle.await.unwrap();
}

#[tokio::test]
async fn test_purge_removes_only_expired_sessions() {
    let (credential_actor, credentials) = admin_actor::new_credentials(8);
    let (session_actor, sessions) = admin_actor::new_sessions(8);
    let credential_handle = tokio::spawn(credential_actor.run(()));
    let session_handle = tokio::spawn(session_actor.run(()));

    let short_lived = AdminClient::new(
        credentials.clone(),
        sessions.clone(),
        AdminSettings {
            session_ttl_secs: 0,
            ..settings()
        },
    );
    let admin = AdminClient::new(credentials, sessions, settings());

    admin.setup("letmein").await.unwrap();
    let live = admin.login("letmein").await.unwrap();
    short_lived.login("letmein").await.unwrap();
    short_lived.login("letmein").await.unwrap();

    assert_eq!(admin.purge_expired_sessions().await.unwrap(), 2);
    assert_eq!(admin.purge_expired_sessions().await.unwrap(), 0);
    assert!(admin.validate_session(&live.token).await.is_ok());

    // Changing the password needs the current one
    assert_eq!(
        admin.change_password(&live.token, "nope!!", "fresh-pass").await,
        Err(AuthError::InvalidCredentials)
    );
    assert_eq!(
        admin.change_password(&live.token, "letmein", "abc").await,
        Err(AuthError::PasswordTooShort { min: 6 })
    );
    admin
        .change_password(&live.token, "letmein", "fresh-pass")
        .await
        .unwrap();
    assert!(admin.login("fresh-pass").await.is_ok());

    assert!(!admin.is_closed());
    drop(admin);
    drop(short_lived);
    credential_handle.await.unwrap();
    session_handle.await.unwrap();
}

/// An expiry past the calendar range is refused without taking the session actor down.
#[tokio::test]
async fn test_out_of_range_session_ttl_keeps_session_store_alive() {
    let (session_actor, sessions) = admin_actor::new_sessions(8);
    let session_handle = tokio::spawn(session_actor.run(()));

    let result = sessions
        .create(SessionCreate {
            ttl: chrono::Duration::MAX,
        })
        .await;
    assert!(matches!(
        result.map_err(|e| e.into_entity_error::<AuthError>()),
        Err(Ok(AuthError::InvalidSessionTtl(_)))
    ));
    assert!(sessions.list(SessionFilter::All).await.unwrap().is_empty());

    let (credential_actor, credentials) = admin_actor::new_credentials(8);
    let credential_handle = tokio::spawn(credential_actor.run(()));
    let overflowing = AdminClient::new(
        credentials.clone(),
        sessions.clone(),
        AdminSettings {
            session_ttl_secs: 9_000_000_000_000_000,
            ..settings()
        },
    );
    let unrepresentable = AdminClient::new(
        credentials.clone(),
        sessions.clone(),
        AdminSettings {
            session_ttl_secs: i64::MAX,
            ..settings()
        },
    );
    let admin = AdminClient::new(credentials, sessions, settings());

    admin.setup("letmein").await.unwrap();
    assert!(matches!(
        overflowing.login("letmein").await,
        Err(AuthError::InvalidSessionTtl(_))
    ));
    assert!(matches!(
        unrepresentable.login("letmein").await,
        Err(AuthError::InvalidSessionTtl(_))
    ));

    // The store still answers
    let session = admin.login("letmein").await.unwrap();
    assert!(admin.validate_session(&session.token).await.is_ok());

    drop(admin);
    drop(overflowing);
    drop(unrepresentable);
    credential_handle.await.unwrap();
    session_handle.await.unwrap();
}

#[tokio::test]
async fn test_closed_store_reports_communication_error() {
    let mut order_mock = MockClient::<restaurant::model::StoredOrder>::new();
    order_mock
        .expect_create()
        .return_err(FrameworkError::ActorClosed);
    let order_client = OrderClient::new(order_mock.client());

    let result = order_client.place_order(table(100.0)).await;
    assert!(matches!(result, Err(OrderError::ActorCommunicationError(_))));
    assert!(!order_client.is_closed());
    order_mock.verify();
}

use async_trait::async_trait;
use resource_actor::{ActorEntity, FrameworkError, ResourceActor};
use std::cmp::Ordering;

// --- Test Entity ---

#[derive(Clone, Debug, PartialEq)]
struct Ticket {
    id: u32,
    table: u32,
    course: u8,
}

#[derive(Debug)]
struct TicketCreate {
    table: u32,
}

#[derive(Debug)]
enum TicketAction {
    NextCourse,
}

#[derive(Debug, thiserror::Error)]
enum TicketError {
    #[error("table must be positive")]
    NoTable,
    #[error("last course already served")]
    Finished,
}

#[async_trait]
impl ActorEntity for Ticket {
    type Id = u32;
    type Create = TicketCreate;
    type Update = u32;
    type Filter = Option<u32>;
    type Action = TicketAction;
    type ActionResult = u8;
    type Context = ();
    type Error = TicketError;

    fn from_create_params(id: u32, params: TicketCreate) -> Result<Self, Self::Error> {
        if params.table == 0 {
            return Err(TicketError::NoTable);
        }
        Ok(Self {
            id,
            table: params.table,
            course: 1,
        })
    }

    async fn on_update(&mut self, table: u32, _ctx: &()) -> Result<(), Self::Error> {
        self.table = table;
        Ok(())
    }

    async fn handle_action(&mut self, action: TicketAction, _ctx: &()) -> Result<u8, Self::Error> {
        match action {
            TicketAction::NextCourse if self.course >= 3 => Err(TicketError::Finished),
            TicketAction::NextCourse => {
                self.course += 1;
                Ok(self.course)
            }
        }
    }

    fn matches(&self, filter: &Option<u32>) -> bool {
        filter.map_or(true, |table| self.table == table)
    }

    fn list_order(&self, other: &Self) -> Ordering {
        other.id.cmp(&self.id)
    }
}

fn counter() -> impl FnMut() -> u32 + Send + 'static {
    let mut next = 0;
    move || {
        next += 1;
        next
    }
}

#[tokio::test]
async fn test_framework_full_lifecycle() {
    let (actor, client) = ResourceActor::<Ticket>::new(10, counter());
    let handle = tokio::spawn(actor.run(()));

    // Create returns the stored entity
    let ticket = client.create(TicketCreate { table: 4 }).await.unwrap();
    assert_eq!(ticket, Ticket { id: 1, table: 4, course: 1 });

    // Action mutates state
    let course = client.perform_action(1, TicketAction::NextCourse).await.unwrap();
    assert_eq!(course, 2);
    assert_eq!(client.get(1).await.unwrap().unwrap().course, 2);

    // Update
    let moved = client.update(1, 7).await.unwrap();
    assert_eq!(moved.table, 7);

    // Delete
    client.delete(1).await.unwrap();
    assert!(client.get(1).await.unwrap().is_none());
    assert!(matches!(client.update(1, 2).await, Err(FrameworkError::NotFound(id)) if id == "1"));
    assert!(matches!(client.delete(1).await, Err(FrameworkError::NotFound(_))));

    drop(client);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_list_filters_and_orders() {
    let (actor, client) = ResourceActor::<Ticket>::new(10, counter());
    tokio::spawn(actor.run(()));

    for table in [1, 2, 1] {
        client.create(TicketCreate { table }).await.unwrap();
    }

    let all: Vec<u32> = client.list(None).await.unwrap().iter().map(|t| t.id).collect();
    assert_eq!(all, vec![3, 2, 1]);

    let table_one: Vec<u32> = client.list(Some(1)).await.unwrap().iter().map(|t| t.id).collect();
    assert_eq!(table_one, vec![3, 1]);
}

#[tokio::test]
async fn test_entity_errors_are_boxed_and_recoverable() {
    let (actor, client) = ResourceActor::<Ticket>::new(10, counter());
    tokio::spawn(actor.run(()));

    let err = client.create(TicketCreate { table: 0 }).await.unwrap_err();
    assert!(matches!(err.into_entity_error::<TicketError>(), Ok(TicketError::NoTable)));

    client.create(TicketCreate { table: 3 }).await.unwrap();
    client.perform_action(2, TicketAction::NextCourse).await.unwrap();
    client.perform_action(2, TicketAction::NextCourse).await.unwrap();
    let err = client
        .perform_action(2, TicketAction::NextCourse)
        .await
        .unwrap_err();
    assert!(matches!(err.into_entity_error::<TicketError>(), Ok(TicketError::Finished)));
}

#[tokio::test]
async fn test_fixed_key_makes_a_singleton() {
    let (actor, client) = ResourceActor::<Ticket>::new(10, || 42);
    tokio::spawn(actor.run(()));

    client.create(TicketCreate { table: 1 }).await.unwrap();
    let second = client.create(TicketCreate { table: 2 }).await;
    assert!(matches!(second, Err(FrameworkError::AlreadyExists(id)) if id == "42"));
    assert_eq!(client.get(42).await.unwrap().unwrap().table, 1);
}

#[tokio::test]
async fn test_closed_actor_reports_actor_closed() {
    let (actor, client) = ResourceActor::<Ticket>::new(10, counter());
    drop(actor);
    assert!(client.is_closed());
    assert!(matches!(client.get(1).await, Err(FrameworkError::ActorClosed)));
}

use std::collections::HashMap;
use std::fmt::{Debug, Display};
use std::hash::Hash;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, instrument, warn};

// =============================================================================
// 1. THE ABSTRACTION (Entity trait with lifecycle hooks and custom actions)
// =============================================================================

/// Trait that any shop record must implement to be managed by [`ResourceActor`].
pub trait Entity: Clone + Send + Sync + 'static {
    /// Short label used in log fields and not-found messages.
    const KIND: &'static str;

    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;
    type CreateParams: Send + Sync + Debug;
    type Patch: Send + Sync + Debug;
    type Action: Send + Sync + Debug;
    type ActionResult: Send + Sync + Debug;
    type Error: std::error::Error + Clone + Send + Sync + 'static;

    fn id(&self) -> &Self::Id;

    /// Build the full record from the assigned id and the creation payload.
    fn from_create_params(id: Self::Id, params: Self::CreateParams) -> Result<Self, Self::Error>;

    // --- Lifecycle Hooks ---

    fn on_create(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
    fn on_update(&mut self, patch: Self::Patch) -> Result<(), Self::Error>;
    fn on_delete(&self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Handle a record-specific action such as a stock reservation or a status change.
    fn handle_action(&mut self, action: Self::Action) -> Result<Self::ActionResult, Self::Error>;
}

/// Errors produced by the actor plumbing, wrapping the entity's own error type.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FrameworkError<E> {
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },
    #[error("{kind} already exists: {id}")]
    AlreadyExists { kind: &'static str, id: String },
    #[error("{0}")]
    Domain(E),
    #[error("actor closed")]
    ActorClosed,
    #[error("actor dropped the request")]
    ActorDropped,
}

// =============================================================================
// 2. THE GENERIC MESSAGES
// =============================================================================

pub type Response<T, E> = oneshot::Sender<Result<T, FrameworkError<E>>>;

#[derive(Debug)]
pub enum ResourceRequest<T: Entity> {
    Create {
        params: T::CreateParams,
        respond_to: Response<T::Id, T::Error>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>, T::Error>,
    },
    List {
        respond_to: Response<Vec<T>, T::Error>,
    },
    Update {
        id: T::Id,
        patch: T::Patch,
        respond_to: Response<T, T::Error>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<(), T::Error>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult, T::Error>,
    },
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

type IdFn<T> = Box<dyn Fn(&<T as Entity>::CreateParams) -> <T as Entity>::Id + Send + Sync>;

pub struct ResourceActor<T: Entity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
    next_id_fn: IdFn<T>,
}

impl<T: Entity> ResourceActor<T> {
    /// Creates the actor and its client. `next_id_fn` may derive the id from
    /// the payload (discount codes) or ignore it and count (orders, products).
    pub fn new(
        buffer_size: usize,
        next_id_fn: impl Fn(&T::CreateParams) -> T::Id + Send + Sync + 'static,
    ) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            next_id_fn: Box::new(next_id_fn),
        };
        (actor, ResourceClient::new(sender))
    }

    #[instrument(name = "resource_actor", skip(self), fields(kind = T::KIND))]
    pub async fn run(mut self) {
        info!("Actor starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    let _ = respond_to.send(self.handle_create(params));
                }
                ResourceRequest::Get { id, respond_to } => {
                    let _ = respond_to.send(Ok(self.store.get(&id).cloned()));
                }
                ResourceRequest::List { respond_to } => {
                    let _ = respond_to.send(Ok(self.store.values().cloned().collect()));
                }
                ResourceRequest::Update { id, patch, respond_to } => {
                    let _ = respond_to.send(self.handle_update(id, patch));
                }
                ResourceRequest::Delete { id, respond_to } => {
                    let _ = respond_to.send(self.handle_delete(id));
                }
                ResourceRequest::Action { id, action, respond_to } => {
                    let _ = respond_to.send(self.handle_action(id, action));
                }
            }
        }
        info!(remaining = self.store.len(), "Actor stopped");
    }

    fn handle_create(&mut self, params: T::CreateParams) -> Result<T::Id, FrameworkError<T::Error>> {
        let id = (self.next_id_fn)(&params);
        if self.store.contains_key(&id) {
            warn!(id = %id, "Rejecting duplicate create");
            return Err(FrameworkError::AlreadyExists { kind: T::KIND, id: id.to_string() });
        }
        let mut item = T::from_create_params(id.clone(), params).map_err(FrameworkError::Domain)?;
        item.on_create().map_err(FrameworkError::Domain)?;
        self.store.insert(item.id().clone(), item);
        debug!(id = %id, "Created");
        Ok(id)
    }

    fn handle_update(&mut self, id: T::Id, patch: T::Patch) -> Result<T, FrameworkError<T::Error>> {
        let item = self.store.get_mut(&id).ok_or_else(|| not_found::<T>(&id))?;
        item.on_update(patch).map_err(FrameworkError::Domain)?;
        Ok(item.clone())
    }

    fn handle_delete(&mut self, id: T::Id) -> Result<(), FrameworkError<T::Error>> {
        let item = self.store.get(&id).ok_or_else(|| not_found::<T>(&id))?;
        item.on_delete().map_err(FrameworkError::Domain)?;
        self.store.remove(&id);
        Ok(())
    }

    fn handle_action(
        &mut self,
        id: T::Id,
        action: T::Action,
    ) -> Result<T::ActionResult, FrameworkError<T::Error>> {
        let item = self.store.get_mut(&id).ok_or_else(|| not_found::<T>(&id))?;
        item.handle_action(action).map_err(FrameworkError::Domain)
    }
}

fn not_found<T: Entity>(id: &T::Id) -> FrameworkError<T::Error> {
    FrameworkError::NotFound { kind: T::KIND, id: id.to_string() }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

pub struct ResourceClient<T: Entity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

// Manual impl: a derive would demand `T: Clone` on the wrapper too.
impl<T: Entity> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self { sender: self.sender.clone() }
    }
}

impl<T: Entity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(Response<R, T::Error>) -> ResourceRequest<T>,
    ) -> Result<R, FrameworkError<T::Error>> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn create(&self, params: T::CreateParams) -> Result<T::Id, FrameworkError<T::Error>> {
        self.request(|respond_to| ResourceRequest::Create { params, respond_to }).await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError<T::Error>> {
        self.request(|respond_to| ResourceRequest::Get { id, respond_to }).await
    }

    pub async fn list(&self) -> Result<Vec<T>, FrameworkError<T::Error>> {
        self.request(|respond_to| ResourceRequest::List { respond_to }).await
    }

    pub async fn update(&self, id: T::Id, patch: T::Patch) -> Result<T, FrameworkError<T::Error>> {
        self.request(|respond_to| ResourceRequest::Update { id, patch, respond_to }).await
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), FrameworkError<T::Error>> {
        self.request(|respond_to| ResourceRequest::Delete { id, respond_to }).await
    }

    pub async fn perform_action(
        &self,
        id: T::Id,
        action: T::Action,
    ) -> Result<T::ActionResult, FrameworkError<T::Error>> {
        self.request(|respond_to| ResourceRequest::Action { id, action, respond_to }).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;

    #[derive(Debug, Clone, Error, PartialEq)]
    enum PetError {
        #[error("name must not be empty")]
        EmptyName,
        #[error("already adopted")]
        AlreadyAdopted,
    }

    #[derive(Clone, Debug, PartialEq)]
    struct Pet {
        id: String,
        name: String,
        adopted: bool,
    }

    #[derive(Debug)]
    struct PetCreate {
        name: String,
    }

    #[derive(Debug)]
    enum PetAction {
        Adopt,
    }

    impl Entity for Pet {
        const KIND: &'static str = "pet";
        type Id = String;
        type CreateParams = PetCreate;
        type Patch = String;
        type Action = PetAction;
        type ActionResult = ();
        type Error = PetError;

        fn id(&self) -> &String {
            &self.id
        }

        fn from_create_params(id: String, params: PetCreate) -> Result<Self, PetError> {
            if params.name.is_empty() {
                return Err(PetError::EmptyName);
            }
            Ok(Self { id, name: params.name, adopted: false })
        }

        fn on_update(&mut self, name: String) -> Result<(), PetError> {
            self.name = name;
            Ok(())
        }

        fn handle_action(&mut self, action: PetAction) -> Result<(), PetError> {
            match action {
                PetAction::Adopt if self.adopted => Err(PetError::AlreadyAdopted),
                PetAction::Adopt => {
                    self.adopted = true;
                    Ok(())
                }
            }
        }
    }

    fn spawn_pets() -> ResourceClient<Pet> {
        let counter = Arc::new(AtomicU64::new(1));
        let (actor, client) = ResourceActor::<Pet>::new(10, move |_| {
            format!("pet_{}", counter.fetch_add(1, Ordering::SeqCst))
        });
        tokio::spawn(actor.run());
        client
    }

    #[tokio::test]
    async fn test_crud_and_actions() {
        let client = spawn_pets();

        let id = client.create(PetCreate { name: "Mochi".into() }).await.unwrap();
        assert_eq!(id, "pet_1");

        client.perform_action(id.clone(), PetAction::Adopt).await.unwrap();
        let again = client.perform_action(id.clone(), PetAction::Adopt).await;
        assert_eq!(again, Err(FrameworkError::Domain(PetError::AlreadyAdopted)));

        let renamed = client.update(id.clone(), "Mochi II".into()).await.unwrap();
        assert_eq!(renamed.name, "Mochi II");
        assert!(renamed.adopted);

        assert_eq!(client.list().await.unwrap().len(), 1);
        client.delete(id.clone()).await.unwrap();
        assert_eq!(client.get(id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_validation_and_missing_items() {
        let client = spawn_pets();

        let rejected = client.create(PetCreate { name: String::new() }).await;
        assert_eq!(rejected, Err(FrameworkError::Domain(PetError::EmptyName)));

        let missing = client.delete("pet_42".to_string()).await;
        assert_eq!(
            missing,
            Err(FrameworkError::NotFound { kind: "pet", id: "pet_42".to_string() })
        );
    }

    #[tokio::test]
    async fn test_duplicate_ids_are_rejected() {
        let (actor, client) = ResourceActor::<Pet>::new(10, |params: &PetCreate| params.name.clone());
        tokio::spawn(actor.run());

        client.create(PetCreate { name: "Kuma".into() }).await.unwrap();
        let dup = client.create(PetCreate { name: "Kuma".into() }).await;
        assert_eq!(
            dup,
            Err(FrameworkError::AlreadyExists { kind: "pet", id: "Kuma".to_string() })
        );
    }
}

use admin_console::api::{AuthApi, Credentials, ProfileApi};
use admin_console::model::{Category, Offer, Order, Product, Profile, ProfileForm};
use admin_console::{Backend, Console, ConsoleConfig, ConsoleError};
use async_trait::async_trait;
use chrono::NaiveDate;
use resource_sync::mock::MockStore;
use resource_sync::{Level, Mount, RemoteError, RemoteSource, Resource, ScreenClient};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

struct ScriptedAuth;

#[async_trait]
impl AuthApi for ScriptedAuth {
    async fn login(&self, credentials: &Credentials) -> Result<Option<String>, RemoteError> {
        if credentials.password == "secret" {
            Ok(Some("Welcome back".to_string()))
        } else {
            Err(RemoteError::Rejected {
                status: 401,
                message: Some("Invalid credentials".to_string()),
            })
        }
    }
}

#[derive(Default)]
struct ScriptedProfile {
    updates: Mutex<VecDeque<Result<Option<String>, RemoteError>>>,
    submitted: Mutex<Vec<ProfileForm>>,
}

#[async_trait]
impl ProfileApi for ScriptedProfile {
    async fn fetch_profile(&self) -> Result<Profile, RemoteError> {
        Ok(Profile {
            username: "admin".to_string(),
            email: "admin@furback.test".to_string(),
        })
    }

    async fn update_profile(&self, form: &ProfileForm) -> Result<Option<String>, RemoteError> {
        self.submitted.lock().unwrap().push(form.clone());
        self.updates
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(None))
    }
}

#[derive(Default)]
struct ScriptedOrders {
    replies: Mutex<VecDeque<Result<Vec<Order>, RemoteError>>>,
}

#[async_trait]
impl RemoteSource<Order> for ScriptedOrders {
    async fn list(&self) -> Result<Vec<Order>, RemoteError> {
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(RemoteError::Transport("no reply queued".to_string())))
    }
}

struct Harness {
    categories: MockStore<Category>,
    products: MockStore<Product>,
    offers: MockStore<Offer>,
    orders: Arc<ScriptedOrders>,
    profile: Arc<ScriptedProfile>,
}

impl Harness {
    fn new() -> Self {
        Self {
            categories: MockStore::new(),
            products: MockStore::new(),
            offers: MockStore::new(),
            orders: Arc::new(ScriptedOrders::default()),
            profile: Arc::new(ScriptedProfile::default()),
        }
    }

    fn expect_initial_lists(&self) {
        self.categories.expect_list().return_ok(vec![
            Resource::new("c1", Category::new("Toys")),
            Resource::new("c2", Category::new("Treats")),
        ]);
        self.products.expect_list().return_ok(vec![
            Resource::new("p1", Product::new("Chew Rope", 249.0, 10)),
            Resource::new("p2", Product::new("Salmon Treats", 399.0, 4)),
            Resource::new("p3", Product::new("Rope Toy XL", 499.0, 1)),
        ]);
        self.offers.expect_list().return_ok(vec![Resource::new(
            "o1",
            Offer {
                name: "Monsoon Sale".to_string(),
                discount: Some(15.0),
                start_date: NaiveDate::from_ymd_opt(2024, 7, 1),
                end_date: NaiveDate::from_ymd_opt(2024, 7, 31),
                ..Offer::default()
            },
        )]);
    }

    fn start(&self, config: ConsoleConfig) -> Console {
        let backend = Backend {
            categories: self.categories.store(),
            products: self.products.store(),
            offers: self.offers.store(),
            orders: self.orders.clone(),
            auth: Arc::new(ScriptedAuth),
            profile: self.profile.clone(),
        };
        Console::start(config, backend)
    }

    fn verify(&self) {
        self.categories.verify();
        self.products.verify();
        self.offers.verify();
    }
}

fn order(id: &str, total: f64) -> Order {
    serde_json::from_value(serde_json::json!({ "_id": id, "total": total })).unwrap()
}

#[tokio::test]
async fn test_views_are_refused_before_login() {
    let harness = Harness::new();
    let console = harness.start(ConsoleConfig::default());

    assert_eq!(
        console.categories().err(),
        Some(ConsoleError::LoginRequired)
    );
    assert!(console.products().is_err());
    assert!(console.offers().is_err());
    assert!(console.orders().is_err());
    assert!(console.profile().is_err());
    assert!(console.dashboard().is_err());

    let rejected = console.login("admin", "wrong").await;
    assert_eq!(
        rejected,
        Err(ConsoleError::LoginRejected("Invalid credentials".to_string()))
    );
    assert!(console.categories().is_err());

    // Nothing was fetched for a failed login.
    assert_eq!(harness.categories.request_count(), 0);
    console.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_login_loads_every_list() {
    let harness = Harness::new();
    harness.expect_initial_lists();
    let console = harness.start(ConsoleConfig::default());

    let greeting = console.login("admin", "secret").await.unwrap();
    assert_eq!(greeting, "Welcome back");

    assert_eq!(console.categories().unwrap().list().await.unwrap().len(), 2);
    assert_eq!(console.products().unwrap().list().await.unwrap().len(), 3);
    assert_eq!(console.offers().unwrap().list().await.unwrap().len(), 1);
    assert_eq!(console.dashboard().unwrap().len(), 4);

    let notices = console.notifier().visible();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, Level::Success);
    assert_eq!(notices[0].message, "Welcome back");

    console.shutdown().await.unwrap();
    harness.verify();
}

#[tokio::test]
async fn test_mount_load_fetches_at_startup() {
    let harness = Harness::new();
    harness.expect_initial_lists();
    let console = harness.start(ConsoleConfig::default().with_mount(Mount::Load));

    console.login("admin", "secret").await.unwrap();
    let categories = console.categories().unwrap();
    let loaded = tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            let items = categories.list().await.unwrap();
            if !items.is_empty() {
                break items;
            }
            tokio::task::yield_now().await;
        }
    })
    .await
    .expect("startup fetch should land");
    let names: Vec<_> = loaded.into_iter().map(|item| item.fields.name).collect();
    assert_eq!(names, vec!["Toys", "Treats"]);

    console.shutdown().await.unwrap();
    // Exactly one list request each: startup, not login.
    harness.verify();
    assert_eq!(harness.categories.request_count(), 1);
}

#[tokio::test]
async fn test_search_and_suggestions() {
    let harness = Harness::new();
    harness.expect_initial_lists();
    let console = harness.start(ConsoleConfig::default());
    console.login("admin", "secret").await.unwrap();

    let found = console.products().unwrap().search("rope").await.unwrap();
    let ids: Vec<_> = found.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["p1", "p3"]);
    assert_eq!(console.products().unwrap().search("").await.unwrap().len(), 3);

    let categories = console.categories().unwrap();
    assert_eq!(categories.suggest("tr").await.unwrap(), vec!["Treats"]);
    assert!(categories.suggest("  ").await.unwrap().is_empty());

    let offers = console.offers().unwrap();
    assert_eq!(offers.suggest("sale").await.unwrap(), vec!["Monsoon Sale"]);
    let mid_july = NaiveDate::from_ymd_opt(2024, 7, 15).unwrap();
    let august = NaiveDate::from_ymd_opt(2024, 8, 2).unwrap();
    assert_eq!(offers.active_on(mid_july).await.unwrap().len(), 1);
    assert!(offers.active_on(august).await.unwrap().is_empty());

    console.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_declined_logout_keeps_views_open() {
    let harness = Harness::new();
    harness.expect_initial_lists();
    let console = harness.start(ConsoleConfig::default());
    console.login("admin", "secret").await.unwrap();

    assert!(!console.auth().logout(&|_: &str| false));
    assert!(console.categories().is_ok());

    assert!(console.auth().logout(&|_: &str| true));
    assert_eq!(
        console.products().err(),
        Some(ConsoleError::LoginRequired)
    );

    console.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_failed_order_fetch_keeps_previous_list() {
    let harness = Harness::new();
    harness.expect_initial_lists();
    {
        let mut replies = harness.orders.replies.lock().unwrap();
        replies.push_back(Ok(vec![order("ord1", 1499.0), order("ord2", 250.5)]));
        replies.push_back(Err(RemoteError::Rejected {
            status: 500,
            message: None,
        }));
    }
    let console = harness.start(ConsoleConfig::default());
    console.login("admin", "secret").await.unwrap();

    let book = console.orders().unwrap();
    assert_eq!(book.load().await.unwrap(), 2);
    assert!(book.load().await.is_err());

    let orders = book.orders().await;
    assert_eq!(orders.len(), 2);
    assert_eq!(orders[1].formatted_total(), "₹250.50");
    assert!(console
        .notifier()
        .visible()
        .iter()
        .any(|n| n.level == Level::Failure && n.message == "Failed to fetch orders."));

    console.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_profile_update_messages() {
    let harness = Harness::new();
    harness.expect_initial_lists();
    {
        let mut updates = harness.profile.updates.lock().unwrap();
        updates.push_back(Ok(None));
        updates.push_back(Err(RemoteError::Transport("connection reset".to_string())));
    }
    let console = harness.start(ConsoleConfig::default());
    console.login("admin", "secret").await.unwrap();

    let mut screen = console.profile().unwrap();
    screen.load().await.unwrap();
    assert_eq!(screen.form().username, "admin");
    assert_eq!(screen.form().password, "");

    screen.set_field("email", "ops@furback.test").unwrap();
    assert!(screen.set_field("role", "root").is_err());
    assert_eq!(screen.submit().await.unwrap(), "Updated successfully");
    assert!(screen.submit().await.is_err());

    let messages: Vec<_> = console
        .notifier()
        .visible()
        .into_iter()
        .map(|n| n.message)
        .collect();
    assert!(messages.contains(&"Updated successfully".to_string()));
    assert!(messages.contains(&"An error occurred while updating.".to_string()));

    let submitted = harness.profile.submitted.lock().unwrap();
    assert_eq!(submitted[0].email, "ops@furback.test");

    drop(submitted);
    console.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_shutdown_stops_controllers() {
    let harness = Harness::new();
    harness.expect_initial_lists();
    let console = harness.start(ConsoleConfig::default());
    console.login("admin", "secret").await.unwrap();

    tokio::time::timeout(Duration::from_secs(5), console.shutdown())
        .await
        .expect("controllers should stop once their clients are dropped")
        .unwrap();
    harness.verify();
}

use admin_console::api::{AuthApi, Credentials, HttpBackend, ProfileApi};
use admin_console::model::{Category, ImageUpload, Order, Product, ProfileForm};
use admin_console::{Backend, Console, ConsoleConfig};
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use resource_sync::{RemoteError, RemoteSource, RemoteStore, Reply, Resource, ScreenClient};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

/// In-memory stand-in for the back-office API.
#[derive(Default)]
struct FakeApi {
    categories: Vec<(String, String)>,
    next_id: u32,
    product_parts: Vec<(String, Option<String>)>,
    last_profile: Option<Value>,
}

type Shared = Arc<Mutex<FakeApi>>;

fn category_json(id: &str, name: &str) -> Value {
    json!({ "_id": id, "categoryName": name, "__v": 0 })
}

async fn list_categories(State(api): State<Shared>) -> Json<Value> {
    let api = api.lock().unwrap();
    Json(Value::Array(
        api.categories
            .iter()
            .map(|(id, name)| category_json(id, name))
            .collect(),
    ))
}

async fn create_category(
    State(api): State<Shared>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let Some(name) = body["categoryName"].as_str().filter(|n| !n.is_empty()) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": "Category name is required" })),
        );
    };
    let mut api = api.lock().unwrap();
    api.next_id += 1;
    let id = format!("c{}", api.next_id);
    api.categories.push((id, name.to_string()));
    (
        StatusCode::CREATED,
        Json(json!({ "message": "Category added successfully" })),
    )
}

async fn update_category(
    State(api): State<Shared>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let mut api = api.lock().unwrap();
    let name = body["categoryName"].as_str().unwrap_or_default().to_string();
    match api.categories.iter_mut().find(|(cid, _)| *cid == id) {
        Some(entry) => {
            entry.1 = name.clone();
            (StatusCode::OK, Json(category_json(&id, &name)))
        }
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "Category not found" })),
        ),
    }
}

async fn delete_category(
    State(api): State<Shared>,
    Path(id): Path<String>,
) -> (StatusCode, Json<Value>) {
    let mut api = api.lock().unwrap();
    let before = api.categories.len();
    api.categories.retain(|(cid, _)| *cid != id);
    if api.categories.len() == before {
        (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "Category not found" })),
        )
    } else {
        (
            StatusCode::OK,
            Json(json!({ "message": "Category deleted" })),
        )
    }
}

async fn create_product(State(api): State<Shared>, mut multipart: Multipart) -> Json<Value> {
    let mut parts = Vec::new();
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_owned);
        let _ = field.bytes().await.unwrap();
        parts.push((name, file_name));
    }
    api.lock().unwrap().product_parts = parts;
    Json(json!({ "message": "Product added successfully" }))
}

async fn list_offers() -> (StatusCode, &'static str) {
    (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded")
}

async fn list_orders() -> Json<Value> {
    Json(json!([{
        "_id": "ord1",
        "userId": "u1",
        "total": "2499",
        "paymentMethod": "UPI",
        "deliveryInfo": { "address": "4 Hill St", "phone": "9000000000" },
        "createdAt": "2024-06-01T09:30:00.000Z"
    }]))
}

async fn login(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if body["username"] == "admin" && body["password"] == "secret" {
        (StatusCode::OK, Json(json!({ "message": "Login successful" })))
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Invalid credentials" })),
        )
    }
}

async fn get_user() -> Json<Value> {
    Json(json!({ "username": "admin", "email": "admin@furback.test", "password": "$2b$hash" }))
}

async fn update_user(State(api): State<Shared>, Json(body): Json<Value>) -> Json<Value> {
    api.lock().unwrap().last_profile = Some(body);
    Json(json!({ "message": "Profile updated" }))
}

async fn spawn_api(seed: &[(&str, &str)]) -> (String, Shared) {
    let api: Shared = Arc::new(Mutex::new(FakeApi {
        categories: seed
            .iter()
            .map(|(id, name)| (id.to_string(), name.to_string()))
            .collect(),
        next_id: 100,
        ..FakeApi::default()
    }));
    let app = Router::new()
        .route("/api/categories", get(list_categories))
        .route("/api/category", post(create_category))
        .route(
            "/api/category/{id}",
            put(update_category).delete(delete_category),
        )
        .route("/api/products", post(create_product))
        .route("/api/offers", get(list_offers))
        .route("/api/confirm", get(list_orders))
        .route("/admin", post(login))
        .route("/api/user", get(get_user))
        .route("/api/user/update", put(update_user))
        .with_state(api.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{}", addr), api)
}

#[tokio::test]
async fn test_list_decodes_records() {
    let (url, _) = spawn_api(&[("c1", "Toys"), ("c2", "Food")]).await;
    let backend = HttpBackend::new(url).unwrap();

    let items = RemoteSource::<Resource<Category>>::list(&backend).await.unwrap();

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].id.as_str(), "c1");
    assert_eq!(items[1].fields.name, "Food");
}

#[tokio::test]
async fn test_create_returns_server_message() {
    let (url, api) = spawn_api(&[]).await;
    let backend = HttpBackend::new(url).unwrap();

    let reply = RemoteStore::<Category>::create(&backend, Category::new("Beds"))
        .await
        .unwrap();

    assert_eq!(reply, Reply::Message("Category added successfully".to_string()));
    assert_eq!(api.lock().unwrap().categories.len(), 1);
}

#[tokio::test]
async fn test_update_returns_record() {
    let (url, _) = spawn_api(&[("c1", "Toys")]).await;
    let backend = HttpBackend::new(url).unwrap();

    let reply = RemoteStore::<Category>::update(&backend, "c1".into(), Category::new("Pet Toys"))
        .await
        .unwrap();

    assert_eq!(
        reply.record().map(|r| r.fields.name.as_str()),
        Some("Pet Toys")
    );
}

#[tokio::test]
async fn test_delete_of_missing_id_is_rejected_with_message() {
    let (url, _) = spawn_api(&[("c1", "Toys")]).await;
    let backend = HttpBackend::new(url).unwrap();

    let ack = RemoteStore::<Category>::remove(&backend, "c1".into()).await.unwrap();
    assert_eq!(ack.message.as_deref(), Some("Category deleted"));

    let err = RemoteStore::<Category>::remove(&backend, "c1".into())
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.server_message(), Some("Category not found"));
}

#[tokio::test]
async fn test_non_json_error_has_no_message() {
    let (url, _) = spawn_api(&[]).await;
    let backend = HttpBackend::new(url).unwrap();

    let err = RemoteSource::<Resource<admin_console::model::Offer>>::list(&backend)
        .await
        .unwrap_err();

    assert_eq!(
        err,
        RemoteError::Rejected {
            status: 500,
            message: None
        }
    );
}

#[tokio::test]
async fn test_unreachable_server_is_transport_error() {
    let backend = HttpBackend::new("http://127.0.0.1:1").unwrap();
    let err = RemoteSource::<Order>::list(&backend).await.unwrap_err();
    assert!(matches!(err, RemoteError::Transport(_)));
}

#[tokio::test]
async fn test_product_create_is_multipart_with_image() {
    let (url, api) = spawn_api(&[]).await;
    let backend = HttpBackend::new(url).unwrap();

    let product = Product {
        category: "Toys".to_string(),
        ..Product::new("Chew Rope", 249.0, 10)
    }
    .with_upload(ImageUpload::new("rope.png", "image/png", vec![0x89, b'P', b'N', b'G']));
    RemoteStore::<Product>::create(&backend, product).await.unwrap();

    let parts = api.lock().unwrap().product_parts.clone();
    let names: Vec<_> = parts.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(
        names,
        vec!["productName", "productPrice", "productQty", "category", "productImage"]
    );
    assert_eq!(parts.last().unwrap().1.as_deref(), Some("rope.png"));
}

#[tokio::test]
async fn test_orders_login_and_profile_endpoints() {
    let (url, api) = spawn_api(&[]).await;
    let backend = HttpBackend::new(url).unwrap();

    let orders = RemoteSource::<Order>::list(&backend).await.unwrap();
    assert_eq!(orders[0].formatted_total(), "₹2499.00");
    assert_eq!(orders[0].phone(), "9000000000");

    let greeting = backend
        .login(&Credentials::new("admin", "secret"))
        .await
        .unwrap();
    assert_eq!(greeting.as_deref(), Some("Login successful"));
    let rejected = backend
        .login(&Credentials::new("admin", "nope"))
        .await
        .unwrap_err();
    assert_eq!(rejected.server_message(), Some("Invalid credentials"));

    let profile = backend.fetch_profile().await.unwrap();
    assert_eq!(profile.email, "admin@furback.test");

    let mut form = ProfileForm::from(profile);
    form.set_field("password", "n3w-pass").unwrap();
    let message = backend.update_profile(&form).await.unwrap();
    assert_eq!(message.as_deref(), Some("Profile updated"));
    assert_eq!(
        api.lock().unwrap().last_profile,
        Some(json!({ "username": "admin", "email": "admin@furback.test", "password": "n3w-pass" }))
    );
}

#[tokio::test]
async fn test_console_round_trip_over_http() {
    let (url, api) = spawn_api(&[("c1", "Toys"), ("c2", "Food")]).await;
    let config = ConsoleConfig::default().with_base_url(url);
    let console = Console::start(config.clone(), Backend::http(&config).unwrap());

    assert!(console.categories().is_err());
    console.login("admin", "secret").await.unwrap();

    let categories = console.categories().unwrap();
    let names = |items: Vec<Resource<Category>>| -> Vec<String> {
        items.into_iter().map(|item| item.fields.name).collect()
    };
    assert_eq!(names(categories.list().await.unwrap()), vec!["Toys", "Food"]);

    categories.begin("c1".into()).await.unwrap();
    categories.edit("name", "Pet Toys").await.unwrap();
    categories.save().await.unwrap();

    let mut form = Category::new("Beds");
    categories.submit(&mut form).await.unwrap();
    assert_eq!(form, Category::default());

    categories.remove("c2".into(), &|_: &str| true).await.unwrap();

    assert_eq!(
        names(categories.list().await.unwrap()),
        vec!["Pet Toys", "Beds"]
    );
    assert_eq!(api.lock().unwrap().categories.len(), 2);

    console.shutdown().await.unwrap();
}

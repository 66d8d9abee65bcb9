use criterion::{black_box, criterion_group, criterion_main, Criterion};
use axum::body::Body;
use axum::http::Request;
use tower::ServiceExt;
use ac_server::{app_with_state, state::AppState};
use tokio::runtime::Runtime;

fn webhook_request(body: &'static str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/whatsapp")
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap()
}

fn bench_http_liveness(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    c.bench_function("http_liveness_1000", |b| {
        b.iter(|| {
            rt.block_on(async {
                for _ in 0..1000 {
                    let app = app_with_state(AppState::default());
                    let req = Request::builder().uri("/").body(Body::empty()).unwrap();
                    let resp = app.oneshot(req).await.unwrap();
                    black_box(resp.status());
                }
            })
        })
    });
}

fn bench_http_webhook(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();

    c.bench_function("http_webhook_greet_and_book_100", |b| {
        b.iter(|| {
            rt.block_on(async {
                let state = AppState::default();
                for _ in 0..100 {
                    let app = app_with_state(state.clone());
                    let resp = app
                        .oneshot(webhook_request("Body=hola&From=whatsapp%3A%2B5215512345678"))
                        .await
                        .unwrap();
                    black_box(resp.status());

                    let app = app_with_state(state.clone());
                    let resp = app
                        .oneshot(webhook_request(
                            "Body=reservar+2025-10-31+12%3A30+Juan+-+Corte&From=whatsapp%3A%2B5215512345678",
                        ))
                        .await
                        .unwrap();
                    black_box(resp.status());
                }
            })
        })
    });
}

criterion_group!(benches, bench_http_liveness, bench_http_webhook);
criterion_main!(benches);

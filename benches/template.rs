//! Benchmarks for schema rendering and request preparation.

use std::hint::black_box;
use std::sync::Arc;

use criterion::{Criterion, criterion_group, criterion_main};
use femtologging_http::{
    DispatchError, HTTPAdapterBuilder, HandlerBuilderTrait, HttpResponse, HttpTransport,
    OutboundRequest, Template, TransportError,
};
use serde_json::{Value, json};

const SCHEMA: &str =
    r#"{"host":"{{hostname}}","level":"{{level}}","msg":"{{msg}}","stack":"{{err.stack}}"}"#;

/// Transport that never touches the network.
struct NullTransport;

impl HttpTransport for NullTransport {
    fn send(&self, _request: &OutboundRequest) -> Result<HttpResponse, TransportError> {
        Ok(HttpResponse::new(204, "No Content"))
    }
}

fn sample_record() -> Value {
    json!({
        "hostname": "box1",
        "level": "error",
        "msg": "request failed",
        "err": {"stack": "at handler (app.rs:10)\nat main (main.rs:3)\nat start"},
    })
}

fn bench_render(c: &mut Criterion) {
    let template = Template::parse(SCHEMA);
    let record = sample_record();
    c.bench_function("template_render", |b| {
        b.iter(|| black_box(template.render(black_box(&record))))
    });
    c.bench_function("template_parse_and_render", |b| {
        b.iter(|| black_box(Template::parse(black_box(SCHEMA)).render(&record)))
    });
}

fn bench_prepare(c: &mut Criterion) {
    let adapter = HTTPAdapterBuilder::new()
        .with_endpoint("https://example.test/log")
        .with_schema(SCHEMA)
        .with_transport(Arc::new(NullTransport))
        .with_sink(Arc::new(|_: &DispatchError| {}))
        .build_inner()
        .expect("valid configuration");
    let raw = sample_record().to_string();
    c.bench_function("adapter_prepare_raw", |b| {
        b.iter(|| black_box(adapter.prepare(black_box(raw.as_str()))))
    });
}

criterion_group!(benches, bench_render, bench_prepare);
criterion_main!(benches);

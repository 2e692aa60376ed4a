use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rulebuilder::{tokenize, translate_expression, FieldService, InputRecord, Translator};

/// A conjunction of `n` comparisons alternating between literal, field-to-field and
/// case-insensitive forms.
fn build_expression(n: usize) -> String {
    (0..n)
        .map(|i| match i % 3 {
            0 => format!("discreteOrderItem.quantity>={i}"),
            1 => "discreteOrderItem.salePrice<discreteOrderItem.retailPrice".to_owned(),
            _ => format!(
                r#"MVEL.eval("toUpperCase()",discreteOrderItem.category.name)==MVEL.eval("toUpperCase()","c{i}")"#
            ),
        })
        .collect::<Vec<_>>()
        .join("&&")
}

fn bench_expression(c: &mut Criterion) {
    let resolver = FieldService::order_item();
    let mut group = c.benchmark_group("expression");

    for n in [1, 10, 50] {
        let expr = build_expression(n);
        group.bench_with_input(BenchmarkId::new("tokenize", n), &expr, |b, expr| {
            b.iter(|| tokenize(black_box(expr)));
        });
        group.bench_with_input(BenchmarkId::new("translate", n), &expr, |b, expr| {
            b.iter(|| translate_expression(black_box(expr), &resolver));
        });
    }

    group.finish();
}

fn bench_batch(c: &mut Criterion) {
    let resolver = FieldService::order_item();
    let translator = Translator::builder()
        .rule_attribute("orderItemMatchRule")
        .quantity_attribute("quantity")
        .build();
    let records: Vec<InputRecord> = (0..200)
        .map(|i| {
            InputRecord::new()
                .set(
                    "orderItemMatchRule",
                    format!(
                        r#"!(discreteOrderItem.product.manufacturer=="m{i}"&&discreteOrderItem.product.model=="x")||discreteOrderItem.price>{i}"#
                    ),
                )
                .set("quantity", (i % 5 + 1).to_string())
        })
        .collect();

    c.bench_function("batch_200", |b| {
        b.iter(|| translator.translate(black_box(&records), &resolver));
    });
}

criterion_group!(benches, bench_expression, bench_batch);
criterion_main!(benches);

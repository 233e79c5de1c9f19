use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use ffe_catalog::{
    Availability, BrowseState, Catalog, Category, CategoryTree, FilterState, Product, SortOrder,
};

const MATERIALS: [&str; 6] = ["oak", "walnut", "brass", "velvet", "marble", "steel"];
const COLORS: [&str; 4] = ["ivory", "navy", "charcoal", "sage"];

/// Three-level forest: `roots` top categories, each with 5 children, each with 4 leaves.
fn synthetic_categories(roots: usize) -> Vec<Category> {
    let mut categories = Vec::new();
    for r in 0..roots {
        let root = format!("r{r}");
        categories.push(Category::new(root.clone(), format!("Root {r}")).ordered((roots - r) as i32));
        for c in 0..5 {
            let child = format!("{root}-c{c}");
            categories.push(Category::new(child.clone(), format!("Child {c}")).child_of(root.clone()).ordered(c));
            for l in 0..4 {
                categories.push(
                    Category::new(format!("{child}-l{l}"), format!("Leaf {l}"))
                        .child_of(child.clone())
                        .ordered(4 - l),
                );
            }
        }
    }
    categories
}

fn synthetic_catalog(products: usize) -> Catalog {
    let categories = synthetic_categories(8);
    let leaves: Vec<String> = categories
        .iter()
        .filter(|c| c.id.as_str().contains("-l"))
        .map(|c| c.id.to_string())
        .collect();

    let products = (0..products)
        .map(|i| Product {
            description: format!("Contract-grade piece number {i} for guest rooms"),
            sku: Some(format!("SKU-{i:05}")),
            price_range: Some(format!("${} - ${}", 100 + (i % 40) * 50, 300 + (i % 40) * 75)),
            materials: vec![MATERIALS[i % MATERIALS.len()].to_string(), MATERIALS[(i / 3) % MATERIALS.len()].to_string()],
            colors: vec![COLORS[i % COLORS.len()].to_string()],
            availability: Availability::ALL[i % Availability::ALL.len()],
            is_featured: i % 11 == 0,
            ..Product::new(format!("p{i}"), leaves[i % leaves.len()].clone(), format!("Product {i}"))
        })
        .collect();

    Catalog::new(categories, products).expect("synthetic catalog is valid")
}

fn bench_tree_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("category_tree_build");
    for roots in [4usize, 32, 128] {
        let categories = synthetic_categories(roots);
        group.throughput(Throughput::Elements(categories.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(categories.len()), &categories, |b, cats| {
            b.iter(|| {
                let tree = CategoryTree::build(black_box(cats.clone()));
                black_box(tree.forest().len())
            })
        });
    }
    group.finish();
}

fn bench_browse(c: &mut Criterion) {
    let mut group = c.benchmark_group("browse_pipeline");
    for size in [500usize, 5_000, 20_000] {
        let catalog = synthetic_catalog(size);
        let state = BrowseState::default()
            .with_category(Some("r1".into()))
            .with_filters(
                FilterState::new()
                    .with_search("guest")
                    .with_material("walnut")
                    .with_material("brass")
                    .with_price_range(200.0, 1500.0),
            )
            .with_sort(SortOrder::PriceLowToHigh)
            .with_page(2);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &state, |b, state| {
            b.iter(|| {
                let view = catalog.browse(black_box(state));
                black_box(view.summary.filtered)
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_tree_build, bench_browse);
criterion_main!(benches);

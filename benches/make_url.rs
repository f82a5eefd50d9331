use criterion::{criterion_group, criterion_main, Criterion};
use wikimedia::req::all_images::{BotFilter, ImageSearchOptions, ImageSort};
use wikimedia::req::extracts::ExtractOptions;
use wikimedia::req::Main;

fn make_url_bench(c: &mut Criterion) {
    c.benchmark_group("make_url_search_images")
        .bench_function("parse", |bencher| {
            bencher.iter(|| {
                let u: url::Url = "https://en.wikipedia.org/w/api.php?action=query&\
                list=allimages&\
                aisearch=cat&\
                aisort=timestamp&\
                aidir=older&\
                aistart=2024-01-01T00%3A00%3A00Z&\
                aiend=2024-02-01T00%3A00%3A00Z&\
                aiuser=Uploader&\
                aifilterbots=nobots&\
                aiminsize=1000&\
                aiprop=timestamp%7Cuser%7Csize%7Curl%7Cmime%7Cmediatype%7Cbitdepth&\
                ailimit=50&\
                format=json".parse().unwrap();
                u
            });
        })
        .bench_function("builder", |bencher| {
            bencher.iter(|| {
                let main = Main::all_images(
                    "cat",
                    ImageSearchOptions {
                        sort: Some(ImageSort::Timestamp),
                        start: Some("2024-01-01T00:00:00Z".into()),
                        end: Some("2024-02-01T00:00:00Z".into()),
                        user: Some("Uploader".into()),
                        filter_bots: Some(BotFilter::NoBots),
                        min_size: Some(1000),
                        limit: Some(50),
                        ..Default::default()
                    },
                )
                .unwrap();

                wikimedia::api::mkurl("https://en.wikipedia.org/w/api.php".parse().unwrap(), main)
            })
        });

    c.bench_function("make_url_extracts", |bencher| {
        bencher.iter(|| {
            let main = Main::extracts(
                ["Cat", "Dog", "Albert Einstein", "Rust (programming language)"],
                ExtractOptions {
                    plain_text: true,
                    intro_only: true,
                    sentences: Some(3),
                    single_section: true,
                    ..Default::default()
                },
            )
            .unwrap();

            wikimedia::api::mkurl("https://en.wikipedia.org/w/api.php".parse().unwrap(), main)
        })
    });
}

criterion_group!(benches, make_url_bench);
criterion_main!(benches);

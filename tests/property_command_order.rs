// tests/property_command_order.rs
mod common;
use crate::common::builders::BuildConfigBuilder;
use crate::common::{build_with, project_fs, ENTRY};

use proptest::prelude::*;

use forgeexe::types::{BuildMode, TargetPlatform};

/// Position of each flag in the fixed section order. Values are skipped.
fn section_rank(token: &str) -> Option<usize> {
    let rank = match token {
        "-m" => 0,
        "--noconfirm" => 1,
        "--clean" => 2,
        "--onefile" => 3,
        "--windowed" => 4,
        "-n" => 5,
        "--icon" => 6,
        "--distpath" => 7,
        "--workpath" => 8,
        "--add-data" => 9,
        "--hidden-import" => 10,
        "--collect-all" => 11,
        "--additional-hooks-dir" => 12,
        "--upx-dir=upx" => 13,
        "--version-file" => 14,
        "--extra" => 15,
        _ => return None,
    };
    Some(rank)
}

fn word() -> impl Strategy<Value = String> {
    "[a-z]{1,8}"
}

#[derive(Debug, Clone)]
struct Options {
    no_confirm: bool,
    clean: bool,
    onefile: bool,
    windowed: bool,
    name: Option<String>,
    icon: Option<String>,
    dist: Option<String>,
    data: Vec<(String, String)>,
    hidden: Vec<String>,
    collect: Vec<String>,
    hooks: Vec<String>,
    upx: bool,
    product: Option<String>,
    extra: usize,
    windows: bool,
}

fn options() -> impl Strategy<Value = Options> {
    (
        (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()),
        (
            proptest::option::of(word()),
            proptest::option::of(word()),
            proptest::option::of(word()),
        ),
        (
            proptest::collection::vec((word(), word()), 0..3),
            proptest::collection::vec(word(), 0..3),
            proptest::collection::vec(word(), 0..3),
            proptest::collection::vec(word(), 0..3),
        ),
        (any::<bool>(), proptest::option::of(word()), 0..3usize, any::<bool>()),
    )
        .prop_map(
            |(
                (no_confirm, clean, onefile, windowed),
                (name, icon, dist),
                (data, hidden, collect, hooks),
                (upx, product, extra, windows),
            )| Options {
                no_confirm,
                clean,
                onefile,
                windowed,
                name,
                icon,
                dist,
                data,
                hidden,
                collect,
                hooks,
                upx,
                product,
                extra,
                windows,
            },
        )
}

proptest! {
    #[test]
    fn sections_never_reorder(opts in options()) {
        let fs = project_fs();
        let mut builder = BuildConfigBuilder::new(ENTRY)
            .no_confirm(opts.no_confirm)
            .clean(opts.clean)
            .mode(if opts.onefile { BuildMode::SingleFile } else { BuildMode::SingleDirectory })
            .windowed(opts.windowed)
            .upx(opts.upx);
        if let Some(ref name) = opts.name {
            builder = builder.name(name);
        }
        if let Some(ref icon) = opts.icon {
            builder = builder.icon(icon);
        }
        if let Some(ref dist) = opts.dist {
            builder = builder.dist_dir(&format!("/out/{dist}/dist"));
        }
        for (src, dest) in &opts.data {
            builder = builder.add_data(src, dest);
        }
        for m in &opts.hidden {
            builder = builder.hidden_import(m);
        }
        for m in &opts.collect {
            builder = builder.collect_all(m);
        }
        for d in &opts.hooks {
            builder = builder.hooks_dir(d);
        }
        if let Some(ref product) = opts.product {
            builder = builder.metadata(product, "", "", "");
        }
        for _ in 0..opts.extra {
            builder = builder.extra_arg("--extra");
        }
        let cfg = builder.build();
        let platform = if opts.windows { TargetPlatform::Windows } else { TargetPlatform::Other };

        let cmd = build_with(&cfg, &fs, platform).expect("valid config must build");

        prop_assert_eq!(cmd.argv.last().map(String::as_str), Some(ENTRY));

        let ranks: Vec<usize> = cmd.argv.iter().filter_map(|t| section_rank(t)).collect();
        prop_assert!(
            ranks.windows(2).all(|w| w[0] <= w[1]),
            "out of order: {:?}", cmd.argv
        );

        let count = |flag: &str| cmd.argv.iter().filter(|t| *t == flag).count();
        prop_assert_eq!(count("--add-data"), opts.data.len());
        prop_assert_eq!(count("--hidden-import"), opts.hidden.len());
        prop_assert_eq!(count("--collect-all"), opts.collect.len());
        prop_assert_eq!(count("--additional-hooks-dir"), opts.hooks.len());
        prop_assert_eq!(count("--version-file"), usize::from(opts.windows && opts.product.is_some()));
        prop_assert_eq!(count("--extra"), opts.extra);
    }
}

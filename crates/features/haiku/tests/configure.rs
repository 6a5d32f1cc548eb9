use hkc_domain::{BuildEnv, BundledLibs, DebugSymbols, Library, Optimize, Settings, TargetMode};
use hkc_haiku::{
    CC, CXX, EXIT_DEPENDENCY_TOO_OLD, Haiku, HaikuError, PLATFORM_DEFINES, PLATFORM_INCLUDE,
    PLATFORM_LIBS,
};
use hkc_kernel::process::FakeRunner;
use hkc_kernel::{Host, KernelError, Platform};

fn haiku(runner: FakeRunner) -> Haiku<FakeRunner> {
    Haiku::with_runner(runner).with_host(Host::new("haiku", "x86_64", 64))
}

fn count(list: &[String], value: &str) -> usize {
    list.iter().filter(|v| *v == value).count()
}

fn configure(settings: &mut Settings, env: &mut BuildEnv) -> Result<Vec<String>, HaikuError> {
    let platform = haiku(FakeRunner::new().fallback(""));
    platform.configure(settings, env)?;
    Ok(platform.runner().calls())
}

#[test]
fn default_settings_add_platform_flags_exactly_once() {
    let mut settings = Settings::default();
    let mut env = BuildEnv::default();

    let calls = configure(&mut settings, &mut env).expect("default configure");

    assert!(calls.is_empty(), "bundled libraries never query pkg-config");
    for define in PLATFORM_DEFINES {
        assert_eq!(count(&env.cpp_defines, define), 1, "{define}");
    }
    for lib in PLATFORM_LIBS {
        assert_eq!(count(&env.libs, lib), 1, "{lib}");
    }
    assert_eq!(env.cpp_path.first().map(String::as_str), Some(PLATFORM_INCLUDE));
    assert_eq!(env.cc, CC);
    assert_eq!(env.cxx, CXX);
    assert_eq!(count(&env.cc_flags, "-pipe"), 1);
    assert_eq!(count(&env.link_flags, "-pipe"), 1);
    assert!(env.extra_suffix.is_empty());
}

#[test]
fn every_target_mode_adds_its_flags_once() {
    let cases = [
        (TargetMode::Release, Optimize::Speed, DebugSymbols::Yes, vec!["-g1", "-O3"], vec![]),
        (TargetMode::Release, Optimize::Size, DebugSymbols::No, vec!["-Os"], vec![]),
        (
            TargetMode::ReleaseDebug,
            Optimize::Speed,
            DebugSymbols::Full,
            vec!["-g2", "-O2"],
            vec!["DEBUG_ENABLED"],
        ),
        (
            TargetMode::Debug,
            Optimize::Speed,
            DebugSymbols::Yes,
            vec!["-g3"],
            vec!["DEBUG_ENABLED", "DEBUG_MEMORY_ENABLED"],
        ),
    ];

    for (target, optimize, debug_symbols, flags, defines) in cases {
        let mut settings = Settings { target, optimize, debug_symbols, ..Settings::default() };
        let mut env = BuildEnv::default();
        configure(&mut settings, &mut env).expect("configure");

        assert_eq!(&env.cc_flags[..flags.len()], flags.as_slice(), "{target}");
        for flag in ["-O3", "-O2", "-Os", "-g1", "-g2", "-g3"] {
            let expected = usize::from(flags.contains(&flag));
            assert_eq!(count(&env.cc_flags, flag), expected, "{target}: {flag}");
        }
        assert_eq!(&env.cpp_defines[..defines.len()], defines.as_slice(), "{target}");
    }
}

#[test]
fn lto_links_with_job_count() {
    let mut settings = Settings { use_lto: true, ..Settings::default() };
    let mut env = BuildEnv::with_jobs(6);
    configure(&mut settings, &mut env).expect("configure");

    assert_eq!(count(&env.cc_flags, "-flto"), 1);
    assert_eq!(count(&env.link_flags, "-flto=6"), 1);
    assert_eq!(count(&env.link_flags, "-flto"), 0);
}

#[test]
fn static_cpp_links_runtime_statically() {
    let mut settings = Settings { use_static_cpp: true, ..Settings::default() };
    let mut env = BuildEnv::default();
    configure(&mut settings, &mut env).expect("configure");

    assert_eq!(count(&env.link_flags, "-static-libgcc"), 1);
    assert_eq!(count(&env.link_flags, "-static-libstdc++"), 1);
}

#[test]
fn bundling_freetype_bundles_png_and_zlib() {
    let mut settings = Settings::default();
    settings.set_bundled(Library::Libpng, false);
    settings.set_bundled(Library::Zlib, false);
    let mut env = BuildEnv::default();

    let calls = configure(&mut settings, &mut env).expect("configure");

    assert!(settings.is_bundled(Library::Libpng));
    assert!(settings.is_bundled(Library::Zlib));
    assert!(calls.is_empty());
}

#[test]
fn system_freetype_group_queries_pkg_config() {
    let mut settings = Settings::default();
    for lib in hkc_haiku::deps::FREETYPE_GROUP {
        settings.set_bundled(lib, false);
    }
    let runner = FakeRunner::new()
        .respond("pkg-config freetype2 --cflags --libs", "-I/system/develop/headers/freetype2 -lfreetype")
        .respond("pkg-config libpng16 --cflags --libs", "-lpng16");
    let platform = haiku(runner);
    let mut env = BuildEnv::default();

    platform.configure(&mut settings, &mut env).expect("configure");

    assert_eq!(
        platform.runner().calls(),
        ["pkg-config freetype2 --cflags --libs", "pkg-config libpng16 --cflags --libs"]
    );
    assert_eq!(env.cpp_path, [PLATFORM_INCLUDE, "/system/develop/headers/freetype2"]);
    assert_eq!(count(&env.libs, "freetype"), 1);
    assert_eq!(count(&env.libs, "png16"), 1);
}

#[test]
fn system_theora_forces_system_ogg_and_vorbis() {
    let mut settings = Settings::default();
    settings.set_bundled(Library::Libtheora, false);
    let platform = haiku(FakeRunner::new().fallback(""));
    let mut env = BuildEnv::default();

    platform.configure(&mut settings, &mut env).expect("configure");

    assert!(!settings.is_bundled(Library::Libogg));
    assert!(!settings.is_bundled(Library::Libvorbis));
    assert!(!settings.x86_libtheora_opt_gcc);
    assert_eq!(
        platform.runner().calls(),
        [
            "pkg-config theora theoradec --cflags --libs",
            "pkg-config vorbis vorbisfile --cflags --libs",
            "pkg-config ogg --cflags --libs",
        ]
    );
}

#[test]
fn system_vorbis_alone_forces_system_ogg() {
    let mut settings = Settings::default();
    settings.set_bundled(Library::Libvorbis, false);
    let platform = haiku(FakeRunner::new().fallback(""));

    platform.configure(&mut settings, &mut BuildEnv::default()).expect("configure");

    assert!(!settings.is_bundled(Library::Libogg));
    assert!(settings.is_bundled(Library::Libtheora));
    assert_eq!(
        platform.runner().calls(),
        ["pkg-config vorbis vorbisfile --cflags --libs", "pkg-config ogg --cflags --libs"]
    );
}

#[test]
fn system_opus_alone_forces_system_ogg() {
    let mut settings = Settings::default();
    settings.set_bundled(Library::Opus, false);
    let platform = haiku(FakeRunner::new().fallback(""));

    platform.configure(&mut settings, &mut BuildEnv::default()).expect("configure");

    assert!(!settings.is_bundled(Library::Libogg));
    assert!(settings.is_bundled(Library::Libvorbis));
    assert_eq!(
        platform.runner().calls(),
        ["pkg-config opus opusfile --cflags --libs", "pkg-config ogg --cflags --libs"]
    );
}

#[test]
fn bundled_theora_on_x86_enables_gcc_assembly() {
    let mut settings = Settings::default();
    let mut env = BuildEnv::default();
    configure(&mut settings, &mut env).expect("configure");
    assert!(settings.x86_libtheora_opt_gcc);

    let mut settings = Settings::default();
    let platform = Haiku::with_runner(FakeRunner::new())
        .with_host(Host::new("haiku", "aarch64", 64));
    platform.configure(&mut settings, &mut BuildEnv::default()).expect("configure");
    assert!(!settings.x86_libtheora_opt_gcc);
}

#[test]
fn old_system_bullet_aborts_before_later_mutations() {
    let mut settings = Settings::default();
    settings.set_bundled(Library::Bullet, false);
    settings.set_bundled(Library::Enet, false);
    let runner = FakeRunner::new().respond("pkg-config bullet --modversion", "2.88").fallback("");
    let platform = haiku(runner);
    let mut env = BuildEnv::default();

    let err = platform.configure(&mut settings, &mut env).unwrap_err();

    assert!(matches!(err, HaikuError::DependencyTooOld { library: Library::Bullet, .. }));
    assert_eq!(err.exit_code(), Some(EXIT_DEPENDENCY_TOO_OLD));
    assert_eq!(EXIT_DEPENDENCY_TOO_OLD, 255);
    assert!(err.to_string().contains("2.88"));
    assert_eq!(platform.runner().calls(), ["pkg-config bullet --modversion"]);
    assert!(env.libs.is_empty(), "nothing after the check is linked");
    assert!(!env.cpp_defines.iter().any(|d| d == "HAIKU_ENABLED"));
    assert!(env.cpp_path.is_empty());
}

#[test]
fn recent_system_bullet_is_linked() {
    let mut settings = Settings::default();
    settings.set_bundled(Library::Bullet, false);
    let runner = FakeRunner::new()
        .respond("pkg-config bullet --modversion", "3.05")
        .respond("pkg-config bullet --cflags --libs", "-I/system/develop/headers/bullet -lBulletDynamics -lLinearMath");
    let platform = haiku(runner);
    let mut env = BuildEnv::default();

    platform.configure(&mut settings, &mut env).expect("configure");

    assert_eq!(count(&env.libs, "BulletDynamics"), 1);
    assert_eq!(count(&env.cpp_path, "/system/develop/headers/bullet"), 1);
}

#[test]
fn missing_system_package_is_not_fatal_for_the_process() {
    let mut settings = Settings::default();
    settings.set_bundled(Library::Zstd, false);
    let runner = FakeRunner::new()
        .fail("pkg-config libzstd --cflags --libs", "Package libzstd was not found");
    let platform = haiku(runner);

    let err = platform.configure(&mut settings, &mut BuildEnv::default()).unwrap_err();

    assert!(matches!(
        err,
        HaikuError::Kernel { source: KernelError::CommandFailed { .. }, context: Some(_) }
    ));
    assert_eq!(err.exit_code(), None);
}

#[test]
fn mbedtls_and_miniupnpc_link_by_name() {
    let mut settings = Settings::default();
    settings.set_bundled(Library::Mbedtls, false);
    settings.set_bundled(Library::Miniupnpc, false);
    let platform = haiku(FakeRunner::new());
    let mut env = BuildEnv::default();

    platform.configure(&mut settings, &mut env).expect("configure");

    assert!(platform.runner().calls().is_empty());
    assert_eq!(
        env.cpp_path,
        [
            PLATFORM_INCLUDE,
            "/system/develop/headers/x86/miniupnpc",
            "/system/develop/headers/miniupnpc",
        ]
    );
    assert_eq!(&env.libs[..4], ["mbedtls", "mbedcrypto", "mbedx509", "miniupnpc"]);
}

#[test]
fn all_system_libraries_query_in_dependency_order() {
    let mut settings = Settings { builtin: BundledLibs::system(), ..Settings::default() };
    let runner = FakeRunner::new().respond("pkg-config bullet --modversion", "2.89").fallback("");
    let platform = haiku(runner);

    platform.configure(&mut settings, &mut BuildEnv::default()).expect("configure");

    assert_eq!(
        platform.runner().calls(),
        [
            "pkg-config libwebp --cflags --libs",
            "pkg-config freetype2 --cflags --libs",
            "pkg-config libpng16 --cflags --libs",
            "pkg-config bullet --modversion",
            "pkg-config bullet --cflags --libs",
            "pkg-config libenet --cflags --libs",
            "pkg-config libsquish --cflags --libs",
            "pkg-config libzstd --cflags --libs",
            "pkg-config theora theoradec --cflags --libs",
            "pkg-config vpx --cflags --libs",
            "pkg-config vorbis vorbisfile --cflags --libs",
            "pkg-config opus opusfile --cflags --libs",
            "pkg-config ogg --cflags --libs",
            "pkg-config libwslay --cflags --libs",
            "pkg-config libpcre2-32 --cflags --libs",
        ]
    );
}

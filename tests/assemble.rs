use bootjar_bundler::bundler::{
    AssemblyStep, PackageSettings, Settings, SettingsBuilder, assemble_bundle,
    builder::{cleanup_tasks, run_cleanup},
    manifest::{LaunchManifest, MANIFEST_ENTRY_NAME},
};
use std::{
    fs::{self, File},
    io::{Cursor, Read},
    path::{Path, PathBuf},
};
use tempfile::TempDir;

struct Project {
    dir: TempDir,
}

impl Project {
    fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    fn root(&self) -> &Path {
        self.dir.path()
    }

    fn target(&self) -> PathBuf {
        self.root().join("target")
    }

    fn classes(&self) -> PathBuf {
        self.target().join("classes")
    }

    fn write(&self, rel: &str, body: &[u8]) -> PathBuf {
        let path = self.root().join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, body).unwrap();
        path
    }

    fn settings(&self, dependencies: Vec<PathBuf>) -> Settings {
        SettingsBuilder::new()
            .package_settings(PackageSettings {
                artifact_id: "demo".into(),
                version: "1.0".into(),
                main_class: "com.example.App".into(),
            })
            .compiled_output_dir(self.classes())
            .output_dir(self.target())
            .dependency_files(dependencies)
            .build()
            .unwrap()
    }
}

fn read_entry<R: std::io::Read + std::io::Seek>(archive: &mut zip::ZipArchive<R>, name: &str) -> Vec<u8> {
    let mut bytes = Vec::new();
    archive
        .by_name(name)
        .unwrap_or_else(|e| panic!("missing entry {name}: {e}"))
        .read_to_end(&mut bytes)
        .unwrap();
    bytes
}

fn sorted_names<R: std::io::Read + std::io::Seek>(archive: &zip::ZipArchive<R>) -> Vec<String> {
    let mut names: Vec<String> = archive.file_names().map(String::from).collect();
    names.sort();
    names
}

#[tokio::test]
async fn bundles_classes_and_dependencies() {
    let project = Project::new();
    project.write("target/classes/com/example/App.class", b"\xCA\xFE\xBA\xBE app");
    let a = project.write("repo/a/a-1.0.jar", b"dependency a");
    let b = project.write("repo/b/b-2.0.jar", b"dependency b");

    let artifact = assemble_bundle(project.settings(vec![a, b])).await.unwrap();

    assert_eq!(artifact.path, project.target().join("demo-1.0.zip"));
    assert_eq!(artifact.manifest.class_path_value(), "lib/a-1.0.jar lib/b-2.0.jar");
    assert_eq!(artifact.checksum.len(), 64);
    assert_eq!(artifact.size, fs::metadata(&artifact.path).unwrap().len());

    let mut bundle = zip::ZipArchive::new(File::open(&artifact.path).unwrap()).unwrap();
    assert_eq!(
        sorted_names(&bundle),
        vec!["demo-1.0.jar", "lib/a-1.0.jar", "lib/b-2.0.jar"]
    );
    assert_eq!(read_entry(&mut bundle, "lib/b-2.0.jar"), b"dependency b");

    let jar_bytes = read_entry(&mut bundle, "demo-1.0.jar");
    let mut jar = zip::ZipArchive::new(Cursor::new(jar_bytes)).unwrap();
    assert_eq!(
        sorted_names(&jar),
        vec!["META-INF/MANIFEST.MF", "com/example/App.class"]
    );
    assert_eq!(read_entry(&mut jar, "com/example/App.class"), b"\xCA\xFE\xBA\xBE app");
}

#[tokio::test]
async fn manifest_round_trips_through_the_bundle() {
    let project = Project::new();
    project.write("target/classes/com/example/App.class", b"app");
    let deps = vec![
        project.write("repo/x/first-3.1.4.jar", b"1"),
        project.write("repo/y/second-2.7.jar", b"2"),
        project.write("repo/z/third-1.0.0-SNAPSHOT.jar", b"3"),
    ];

    let artifact = assemble_bundle(project.settings(deps)).await.unwrap();

    let mut bundle = zip::ZipArchive::new(File::open(&artifact.path).unwrap()).unwrap();
    let jar_bytes = read_entry(&mut bundle, "demo-1.0.jar");
    let mut jar = zip::ZipArchive::new(Cursor::new(jar_bytes)).unwrap();
    let manifest_text = String::from_utf8(read_entry(&mut jar, MANIFEST_ENTRY_NAME)).unwrap();
    let manifest = LaunchManifest::parse(&manifest_text).unwrap();

    assert_eq!(manifest.main_class, "com.example.App");
    assert_eq!(manifest.class_path.len(), 3);
    let names = sorted_names(&bundle);
    for token in &manifest.class_path {
        assert!(names.contains(token), "{token} missing from bundle");
    }
}

#[tokio::test]
async fn no_dependencies_gives_empty_class_path() {
    let project = Project::new();
    project.write("target/classes/Main.class", b"main");

    let artifact = assemble_bundle(project.settings(Vec::new())).await.unwrap();

    assert_eq!(artifact.manifest.class_path_value(), "");
    let mut bundle = zip::ZipArchive::new(File::open(&artifact.path).unwrap()).unwrap();
    assert_eq!(sorted_names(&bundle), vec!["demo-1.0.jar", "lib/"]);
    assert!(bundle.by_name("lib/").unwrap().is_dir());
}

#[tokio::test]
async fn duplicate_dependency_names_keep_the_last_copy() {
    let project = Project::new();
    project.write("target/classes/Main.class", b"main");
    let first = project.write("repo/one/common.jar", b"first");
    let second = project.write("repo/two/common.jar", b"second");

    let artifact = assemble_bundle(project.settings(vec![first, second])).await.unwrap();

    assert_eq!(
        artifact.manifest.class_path_value(),
        "lib/common.jar lib/common.jar"
    );
    let mut bundle = zip::ZipArchive::new(File::open(&artifact.path).unwrap()).unwrap();
    assert_eq!(read_entry(&mut bundle, "lib/common.jar"), b"second");
}

#[tokio::test]
async fn missing_classes_fail_before_writing_anything() {
    let project = Project::new();
    let dep = project.write("repo/a.jar", b"a");

    let err = assemble_bundle(project.settings(vec![dep])).await.unwrap_err();

    assert!(err.is_invalid_input());
    assert_eq!(err.step(), Some(AssemblyStep::Validate));
    assert!(!project.target().exists());
}

#[tokio::test]
async fn missing_dependency_is_invalid_input() {
    let project = Project::new();
    project.write("target/classes/Main.class", b"main");

    let err = assemble_bundle(project.settings(vec![project.root().join("repo/gone.jar")]))
        .await
        .unwrap_err();

    assert!(err.is_invalid_input());
    assert!(!project.target().join("demo-1.0.zip").exists());
    assert!(!project.target().join("temp").exists());
}

#[tokio::test]
async fn cleanup_leaves_only_the_bundle_and_classes() {
    let project = Project::new();
    project.write("target/classes/Main.class", b"main");
    project.write("target/maven-status/compiler/inputs.lst", b"x");
    project.write("target/test-classes/MainTest.class", b"t");
    project.write("target/surefire-reports/TEST-Main.xml", b"<r/>");
    project.write("target/demo-1.0.jar", b"stray jar");
    let dep = project.write("repo/a.jar", b"a");

    let artifact = assemble_bundle(project.settings(vec![dep])).await.unwrap();

    assert!(artifact.cleanup.is_clean());
    let mut left: Vec<String> = fs::read_dir(project.target())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    left.sort();
    assert_eq!(left, vec!["classes", "demo-1.0.zip"]);
}

#[tokio::test]
async fn compiled_output_can_be_removed_too() {
    let project = Project::new();
    project.write("target/classes/Main.class", b"main");
    let settings = SettingsBuilder::new()
        .package_settings(PackageSettings {
            artifact_id: "demo".into(),
            version: "1.0".into(),
            main_class: "Main".into(),
        })
        .compiled_output_dir(project.classes())
        .output_dir(project.target())
        .keep_compiled_output(false)
        .build()
        .unwrap();

    assemble_bundle(settings).await.unwrap();

    assert!(!project.classes().exists());
    assert!(project.target().join("demo-1.0.zip").is_file());
}

#[tokio::test]
async fn cleanup_twice_is_a_no_op() {
    let project = Project::new();
    project.write("target/classes/Main.class", b"main");
    let settings = project.settings(Vec::new());

    assemble_bundle(settings.clone()).await.unwrap();
    let report = run_cleanup(&cleanup_tasks(&settings)).await;

    assert!(report.is_clean());
    assert!(report.removed.is_empty());
    assert!(project.target().join("demo-1.0.zip").is_file());
}

#[tokio::test]
async fn stale_staging_tree_is_replaced() {
    let project = Project::new();
    project.write("target/classes/Main.class", b"main");
    project.write("target/temp/lib/leftover.jar", b"old");

    let artifact = assemble_bundle(project.settings(Vec::new())).await.unwrap();

    let bundle = zip::ZipArchive::new(File::open(&artifact.path).unwrap()).unwrap();
    assert_eq!(sorted_names(&bundle), vec!["demo-1.0.jar", "lib/"]);
    assert!(!project.target().join("temp").exists());
}

#[tokio::test]
async fn repeated_runs_produce_identical_archives() {
    let project = Project::new();
    project.write("target/classes/com/example/App.class", b"app");
    project.write("target/classes/app.properties", b"k=v");
    let dep = project.write("repo/a.jar", b"a");

    let first = assemble_bundle(project.settings(vec![dep.clone()])).await.unwrap();
    let first_bytes = fs::read(&first.path).unwrap();
    let second = assemble_bundle(project.settings(vec![dep])).await.unwrap();

    assert_eq!(first.checksum, second.checksum);
    assert_eq!(first_bytes, fs::read(&second.path).unwrap());
}

#[tokio::test]
async fn cleanup_failure_is_recorded_not_fatal() {
    let project = Project::new();
    project.write("target/classes/Main.class", b"main");
    // A regular file where a transient directory is expected cannot be removed as a directory.
    let blocker = project.write("target/generated-sources", b"not a directory");
    project.write("target/maven-status/inputs.lst", b"x");

    let artifact = assemble_bundle(project.settings(Vec::new())).await.unwrap();

    assert!(!artifact.cleanup.is_clean());
    assert_eq!(artifact.cleanup.failures.len(), 1);
    assert_eq!(artifact.cleanup.failures[0].path, blocker);
    assert!(blocker.is_file());
    assert!(!project.target().join("maven-status").exists());
    assert!(!project.target().join("temp").exists());
    assert!(artifact.path.is_file());
}

#[cfg(target_os = "linux")]
#[tokio::test]
async fn failed_pack_leaves_no_partial_jar() {
    use std::{ffi::OsStr, os::unix::ffi::OsStrExt};

    let project = Project::new();
    project.write("target/classes/Main.class", b"main");
    let unnamed = project.classes().join(OsStr::from_bytes(b"bad\xff.class"));
    fs::write(&unnamed, b"x").unwrap();

    let err = assemble_bundle(project.settings(Vec::new())).await.unwrap_err();

    assert_eq!(err.step(), Some(AssemblyStep::Pack));
    assert!(!err.is_invalid_input());
    assert!(!project.target().join("temp/demo-1.0.jar").exists());
    assert!(!project.target().join("demo-1.0.zip").exists());
    assert!(project.classes().join("Main.class").is_file());
}

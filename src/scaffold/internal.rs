//! Generation steps, in the order they run

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use super::artifact::{write_file, Content, GeneratedArtifact, WritePolicy};
use super::layout::{create_dir, ProjectLayout};
use super::report::{Action, GenerationReport};
use super::validation::validate_project_name;
use super::{GenerationRequest, Scaffolder};
use crate::config::ToolchainSection;
use crate::error::GenerationResult;
use crate::paths;
use crate::templates::{self, TemplateId, TemplateValues};
use crate::vscode;

const ROOT_MAKEFILE: GeneratedArtifact = GeneratedArtifact::new(
    paths::ROOT_MAKEFILE,
    TemplateId::RootMakefile,
    WritePolicy::AlwaysOverwrite,
);
const SRCS_MAKEFILE: GeneratedArtifact = GeneratedArtifact::new(
    paths::SRCS_MAKEFILE,
    TemplateId::SrcsMakefile,
    WritePolicy::AlwaysOverwrite,
);
const MAIN_C: GeneratedArtifact =
    GeneratedArtifact::new(paths::MAIN_C, TemplateId::MainC, WritePolicy::SkipIfExists);
const DEFINITIONS_H: GeneratedArtifact = GeneratedArtifact::new(
    paths::DEFINITIONS_H,
    TemplateId::DefinitionsH,
    WritePolicy::SkipIfExists,
);
const STARTUP_S: GeneratedArtifact =
    GeneratedArtifact::new(paths::STARTUP_S, TemplateId::Startup, WritePolicy::SkipIfExists);
const GITIGNORE: GeneratedArtifact = GeneratedArtifact::new(
    paths::GITIGNORE,
    TemplateId::Gitignore,
    WritePolicy::AlwaysOverwrite,
);

pub(super) fn run(
    scaffolder: &Scaffolder,
    request: &GenerationRequest,
    report: &mut GenerationReport,
) -> GenerationResult<()> {
    validate_project_name(&request.project_name)?;

    let options = scaffolder.options();
    let root = request.project_root();
    tracing::info!(
        project = %request.project_name,
        device = %request.device,
        root = %root.display(),
        startup = request.include_startup,
        source = %scaffolder.source().describe(),
        "generating project"
    );

    let values = TemplateValues::new(
        &request.project_name,
        &request.device,
        request.include_startup,
        options.definitions_header,
        &options.toolchain,
    );
    let step = Step {
        scaffolder,
        root: &root,
        values: &values,
    };

    // 1-2. Root and directory skeleton
    ProjectLayout::new(&root, request.include_startup).create(report)?;

    // 3-4. Build files
    step.write(ROOT_MAKEFILE, report)?;
    step.write(SRCS_MAKEFILE, report)?;

    // 5. Starter sources
    step.write(MAIN_C, report)?;
    if options.definitions_header {
        step.write(DEFINITIONS_H, report)?;
    }

    // 6. Startup assembly
    if request.include_startup {
        write_startup(&step, report)?;
    }

    // 7-8. Repository files
    step.write(GITIGNORE, report)?;
    step.write(
        GeneratedArtifact::new(paths::README, TemplateId::Readme, options.readme_policy),
        report,
    )?;

    if options.vscode {
        write_vscode(&step, request, report)?;
    }

    let written = report.written().count();
    let skipped = report.skipped().count();
    tracing::info!(written, skipped, "project generated");
    Ok(())
}

/// Shared state of the file-writing steps
struct Step<'a> {
    scaffolder: &'a Scaffolder,
    root: &'a Path,
    values: &'a TemplateValues<'a>,
}

impl Step<'_> {
    fn write(&self, artifact: GeneratedArtifact, report: &mut GenerationReport) -> GenerationResult<()> {
        write_file(self.root, artifact.relative_path, artifact.policy, report, || {
            let text = self.scaffolder.source().load(artifact.template)?;
            match artifact.content() {
                Content::Verbatim => Ok(text.into_owned()),
                Content::Rendered => templates::render(artifact.template, &text, self.values),
            }
        })
    }
}

/// `startup.S` is only written when `srcs/startup` holds no assembly yet
fn write_startup(step: &Step<'_>, report: &mut GenerationReport) -> GenerationResult<()> {
    let startup_dir = paths::resolve(step.root, paths::STARTUP_DIR);
    create_dir(&startup_dir, report)?;

    let existing = existing_assembly(&startup_dir);
    if !existing.is_empty() {
        let startup = paths::resolve(step.root, paths::STARTUP_S);
        if only_generated_startup(&existing, &startup) {
            tracing::debug!(path = %startup.display(), "startup.S already present");
        } else {
            tracing::warn!(
                existing = ?existing,
                "startup assembly already present, not writing startup.S"
            );
        }
        report.record(Action::Skipped(startup));
        return Ok(());
    }

    step.write(STARTUP_S, report)
}

/// Every `*.S` file directly in `dir`, sorted
fn existing_assembly(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut found: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "S"))
        .collect();
    found.sort();
    found
}

/// True when the only assembly present is the generator's own `startup.S`
fn only_generated_startup(existing: &[PathBuf], startup: &Path) -> bool {
    matches!(existing, [only] if only == startup)
}

/// Builds one VS Code file from the request and toolchain
type VscodeBuilder = fn(&GenerationRequest, &ToolchainSection) -> Value;

const VSCODE_FILES: [(&str, &str, VscodeBuilder); 3] = [
    (paths::VSCODE_TASKS, "tasks.json", |_, _| vscode::tasks()),
    (paths::VSCODE_LAUNCH, "launch.json", |request, toolchain| {
        vscode::launch(&request.project_name, toolchain)
    }),
    (
        paths::VSCODE_CPP_PROPERTIES,
        "c_cpp_properties.json",
        |request, toolchain| vscode::cpp_properties(&request.device, toolchain),
    ),
];

fn write_vscode(
    step: &Step<'_>,
    request: &GenerationRequest,
    report: &mut GenerationReport,
) -> GenerationResult<()> {
    let toolchain = &step.scaffolder.options().toolchain;
    for (relative_path, name, build) in VSCODE_FILES {
        write_file(step.root, relative_path, WritePolicy::SkipIfExists, report, || {
            vscode::to_file_content(name, &build(request, toolchain))
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GenerationError;
    use crate::scaffold::ScaffoldOptions;
    use crate::templates::EmbeddedTemplates;
    use tempfile::TempDir;

    fn scaffolder(options: ScaffoldOptions) -> Scaffolder {
        Scaffolder::new(Box::new(EmbeddedTemplates), options)
    }

    #[test]
    fn test_invalid_name_writes_nothing() {
        let tmp = TempDir::new().unwrap();
        let request = GenerationRequest::new("../escape").output_root(tmp.path().join("out"));

        let err = Scaffolder::embedded().generate(&request).unwrap_err();
        assert!(matches!(err, GenerationError::InvalidProjectName { .. }));
        assert!(!tmp.path().join("out").exists());
    }

    #[test]
    fn test_existing_assembly_blocks_startup() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("Blinky");
        fs::create_dir_all(root.join("srcs").join("startup")).unwrap();
        fs::write(root.join("srcs").join("startup").join("crt0.S"), "custom").unwrap();

        let request = GenerationRequest::new("Blinky")
            .output_root(tmp.path())
            .include_startup(true);
        let report = Scaffolder::embedded().generate(&request).unwrap();

        let startup = root.join("srcs").join("startup").join("startup.S");
        assert!(!startup.exists());
        assert_eq!(report.action_for(&startup), Some(&Action::Skipped(startup.clone())));
    }

    #[test]
    fn test_own_startup_is_recognized_on_rerun() {
        let tmp = TempDir::new().unwrap();
        let request = GenerationRequest::new("Blinky")
            .output_root(tmp.path())
            .include_startup(true);
        Scaffolder::embedded().generate(&request).unwrap();

        let startup_dir = tmp.path().join("Blinky").join("srcs").join("startup");
        let startup = startup_dir.join("startup.S");
        let existing = existing_assembly(&startup_dir);
        assert_eq!(existing, vec![startup.clone()]);
        assert!(only_generated_startup(&existing, &startup));

        fs::write(startup_dir.join("crt0.S"), "custom").unwrap();
        let existing = existing_assembly(&startup_dir);
        assert_eq!(existing.len(), 2);
        assert!(!only_generated_startup(&existing, &startup));

        let report = Scaffolder::embedded().generate(&request).unwrap();
        assert_eq!(report.action_for(&startup), Some(&Action::Skipped(startup.clone())));
    }

    #[test]
    fn test_missing_startup_dir_has_no_assembly() {
        let tmp = TempDir::new().unwrap();
        assert!(existing_assembly(&tmp.path().join("absent")).is_empty());
    }

    #[test]
    fn test_definitions_header_can_be_disabled() {
        let tmp = TempDir::new().unwrap();
        let options = ScaffoldOptions {
            definitions_header: false,
            ..Default::default()
        };
        let request = GenerationRequest::new("Blinky").output_root(tmp.path());
        scaffolder(options).generate(&request).unwrap();

        let root = tmp.path().join("Blinky");
        assert!(!root.join("incs").join("definitions.h").exists());
        let main = fs::read_to_string(root.join("srcs").join("main.c")).unwrap();
        assert!(!main.contains("definitions.h"));
    }

    #[test]
    fn test_readme_policy() {
        let tmp = TempDir::new().unwrap();
        let readme = tmp.path().join("Blinky").join("README.md");
        let request = GenerationRequest::new("Blinky").output_root(tmp.path());

        Scaffolder::embedded().generate(&request).unwrap();
        fs::write(&readme, "notes").unwrap();
        Scaffolder::embedded().generate(&request).unwrap();
        assert_eq!(fs::read_to_string(&readme).unwrap(), "notes");

        let options = ScaffoldOptions {
            readme_policy: WritePolicy::AlwaysOverwrite,
            ..Default::default()
        };
        scaffolder(options).generate(&request).unwrap();
        assert!(fs::read_to_string(&readme).unwrap().contains("Blinky"));
    }

    #[test]
    fn test_vscode_files() {
        let tmp = TempDir::new().unwrap();
        let options = ScaffoldOptions {
            vscode: true,
            ..Default::default()
        };
        let request = GenerationRequest::new("Blinky")
            .device("32MZ2048EFH064")
            .output_root(tmp.path());
        scaffolder(options).generate(&request).unwrap();

        let vscode_dir = tmp.path().join("Blinky").join(".vscode");
        for name in ["tasks.json", "launch.json", "c_cpp_properties.json"] {
            let text = fs::read_to_string(vscode_dir.join(name)).unwrap();
            let _: serde_json::Value = serde_json::from_str(&text).unwrap();
        }
        let props = fs::read_to_string(vscode_dir.join("c_cpp_properties.json")).unwrap();
        assert!(props.contains("__32MZ2048EFH064__"));
        let launch = fs::read_to_string(vscode_dir.join("launch.json")).unwrap();
        assert!(launch.contains("Debug Blinky"));
        let tasks = fs::read_to_string(vscode_dir.join("tasks.json")).unwrap();
        assert!(tasks.contains("\"flash\""));
    }

    #[test]
    fn test_report_order() {
        let tmp = TempDir::new().unwrap();
        let request = GenerationRequest::new("Blinky").output_root(tmp.path());
        let report = Scaffolder::embedded().generate(&request).unwrap();

        let root = tmp.path().join("Blinky");
        let written: Vec<_> = report
            .written()
            .map(|path| report.relative(path).to_path_buf())
            .collect();
        assert_eq!(
            written,
            vec![
                Path::new("Makefile").to_path_buf(),
                Path::new("srcs").join("Makefile"),
                Path::new("srcs").join("main.c"),
                Path::new("incs").join("definitions.h"),
                Path::new(".gitignore").to_path_buf(),
                Path::new("README.md").to_path_buf(),
            ]
        );
        assert_eq!(report.actions[0], Action::CreatedDir(root));
    }
}

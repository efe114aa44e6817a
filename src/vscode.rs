//! VS Code workspace files for a generated project
//!
//! Build tasks drive the generated Makefiles, the launch configuration
//! debugs `bins/<name>` through XC32 gdb and OpenOCD, and the IntelliSense
//! configuration points at the XC32 and Device Family Pack headers.

use serde_json::{json, Value};

use crate::config::ToolchainSection;
use crate::error::{GenerationError, GenerationResult};

fn shared_panel() -> Value {
    json!({
        "echo": true,
        "reveal": "always",
        "focus": false,
        "panel": "shared"
    })
}

/// `tasks.json`: build (default), clean and flash
pub fn tasks() -> Value {
    json!({
        "version": "2.0.0",
        "tasks": [
            {
                "label": "make",
                "type": "shell",
                "command": "make",
                "group": { "kind": "build", "isDefault": true },
                "presentation": shared_panel(),
                "problemMatcher": ["$gcc"]
            },
            {
                "label": "make clean",
                "type": "shell",
                "command": "make",
                "args": ["clean"],
                "group": "build",
                "presentation": shared_panel()
            },
            {
                "label": "flash",
                "type": "shell",
                "command": "make",
                "args": ["flash"],
                "group": "build",
                "presentation": shared_panel(),
                "dependsOn": "make"
            }
        ]
    })
}

/// `launch.json`: remote gdb session against OpenOCD on port 3333
pub fn launch(project_name: &str, toolchain: &ToolchainSection) -> Value {
    let gdb = format!(
        "{}/xc32-gdb{}",
        toolchain.host_compiler_dir(),
        std::env::consts::EXE_SUFFIX
    );

    json!({
        "version": "0.2.0",
        "configurations": [
            {
                "name": format!("Debug {}", project_name),
                "type": "cppdbg",
                "request": "launch",
                "program": format!("${{workspaceFolder}}/bins/{}", project_name),
                "args": [],
                "stopAtEntry": true,
                "cwd": "${workspaceFolder}",
                "environment": [],
                "externalConsole": false,
                "MIMode": "gdb",
                "miDebuggerPath": gdb,
                "setupCommands": [
                    {
                        "description": "Enable pretty-printing for gdb",
                        "text": "-enable-pretty-printing",
                        "ignoreFailures": true
                    }
                ],
                "preLaunchTask": "make",
                "miDebuggerServerAddress": "localhost:3333",
                "debugServerPath": "openocd",
                "debugServerArgs": "-f interface/pickit4.cfg -f target/pic32mz.cfg",
                "serverStarted": "Info : Listening on port 3333 for gdb connections",
                "filterStderr": true,
                "customLaunchSetupCommands": [
                    { "text": "target remote localhost:3333" },
                    { "text": "monitor reset halt" },
                    { "text": "load" }
                ]
            }
        ]
    })
}

/// `c_cpp_properties.json` for the C/C++ extension
pub fn cpp_properties(device: &str, toolchain: &ToolchainSection) -> Value {
    let compiler_dir = toolchain.host_compiler_dir();
    let xc32_root = compiler_dir.trim_end_matches("/bin");

    json!({
        "version": 4,
        "configurations": [
            {
                "name": "XC32",
                "includePath": [
                    "${workspaceFolder}/incs/**",
                    "${workspaceFolder}/srcs/**",
                    format!("{}/pic32mx/include", xc32_root),
                    format!("{}/include", xc32_root),
                    format!("{}/xc32", toolchain.host_dfp_dir())
                ],
                "defines": [
                    "__PIC32MZ__",
                    format!("__{}__", device),
                    "__XC32__"
                ],
                "compilerPath": format!("{}/xc32-gcc{}", compiler_dir, std::env::consts::EXE_SUFFIX),
                "cStandard": "c99",
                "cppStandard": "c++14",
                "intelliSenseMode": "gcc-x86"
            }
        ]
    })
}

/// Pretty-printed JSON with a trailing newline
pub fn to_file_content(name: &'static str, value: &Value) -> GenerationResult<String> {
    let mut text = serde_json::to_string_pretty(value)
        .map_err(|source| GenerationError::Json { name, source })?;
    text.push('\n');
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tasks_drive_make() {
        let tasks = tasks();
        let labels: Vec<_> = tasks["tasks"]
            .as_array()
            .unwrap()
            .iter()
            .map(|task| task["label"].as_str().unwrap())
            .collect();
        assert_eq!(labels, vec!["make", "make clean", "flash"]);
        assert_eq!(tasks["tasks"][2]["args"][0], "flash");
        assert_eq!(tasks["tasks"][0]["group"]["isDefault"], true);
    }

    #[test]
    fn test_launch_points_at_module_binary() {
        let launch = launch("Blinky", &ToolchainSection::default());
        let config = &launch["configurations"][0];
        assert_eq!(config["name"], "Debug Blinky");
        assert_eq!(config["program"], "${workspaceFolder}/bins/Blinky");
        assert!(config["miDebuggerPath"]
            .as_str()
            .unwrap()
            .contains("/xc32/v4.60/bin/xc32-gdb"));
    }

    #[test]
    fn test_cpp_properties_device_define() {
        let props = cpp_properties("32MZ2048EFH064", &ToolchainSection::default());
        let config = &props["configurations"][0];
        let defines: Vec<_> = config["defines"]
            .as_array()
            .unwrap()
            .iter()
            .map(|d| d.as_str().unwrap())
            .collect();
        assert!(defines.contains(&"__32MZ2048EFH064__"));
        let includes = config["includePath"].as_array().unwrap();
        assert!(includes
            .iter()
            .any(|p| p.as_str().unwrap().ends_with("PIC32MZ-EF_DFP/1.4.168/xc32")));
    }

    #[test]
    fn test_file_content_is_pretty_json() {
        let text = to_file_content("tasks.json", &tasks()).unwrap();
        assert!(text.starts_with("{\n  \"version\": \"2.0.0\""));
        assert!(text.ends_with("}\n"));
    }
}

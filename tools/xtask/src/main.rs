//! # xtask - 开发辅助工具
//!
//! 提供本地质量门禁与开发辅助命令。
//!
//! ## 命令
//!
//! - `check-all`: 运行 fmt、clippy、test
//! - `script-check`: 检查脚本文件（解析全部 .tcl，报告语法错误）

use std::path::{Path, PathBuf};
use std::process::{Command, ExitCode};

use tcl_runtime::Script;
use walkdir::WalkDir;

fn run(step: &str, cmd: &mut Command) -> anyhow::Result<()> {
    eprintln!("\n==> {step}");
    let status = cmd.status()?;
    if !status.success() {
        anyhow::bail!("{step} failed with {status}");
    }
    Ok(())
}

fn main() -> ExitCode {
    if let Err(e) = real_main() {
        eprintln!("xtask error: {e:#}");
        return ExitCode::from(1);
    }
    ExitCode::from(0)
}

fn real_main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let sub = args.next().unwrap_or_else(|| "help".to_string());

    match sub.as_str() {
        "check-all" => {
            let mut fmt = Command::new("cargo");
            fmt.args(["fmt", "--all", "--", "--check"]);
            run("cargo fmt --all -- --check", &mut fmt)?;

            let mut clippy = Command::new("cargo");
            clippy.args(["clippy", "--workspace", "--all-targets"]);
            run("cargo clippy --workspace --all-targets", &mut clippy)?;

            let mut test = Command::new("cargo");
            test.args(["test", "--workspace"]);
            run("cargo test --workspace", &mut test)?;
        }
        "script-check" => {
            let path = args.next();
            script_check(path.as_deref())?;
        }
        "help" | "-h" | "--help" => {
            print_help();
        }
        other => anyhow::bail!("unknown xtask subcommand: {other}"),
    }

    Ok(())
}

fn print_help() {
    eprintln!(
        r#"xtask - 开发辅助工具

USAGE:
  cargo xtask <command>

COMMANDS:
  check-all       运行 fmt、clippy、test 门禁检查
  script-check    检查脚本文件

SCRIPT-CHECK:
  cargo xtask script-check [path]

  不带参数：检查 scripts/ 下所有 .tcl 文件
  带路径参数：检查指定文件或目录

  检查内容：
    - 词法 / 语法错误（带位置）
"#
    );
}

//=============================================================================
// script-check 命令实现
//=============================================================================

/// 执行脚本检查
fn script_check(path: Option<&str>) -> anyhow::Result<()> {
    // 确定要检查的文件
    let files = match path {
        Some(p) => {
            let path = PathBuf::from(p);
            if path.is_file() {
                vec![path]
            } else if path.is_dir() {
                collect_scripts(&path)
            } else {
                anyhow::bail!("路径不存在: {p}");
            }
        }
        None => collect_scripts(Path::new("scripts")),
    };

    if files.is_empty() {
        eprintln!("没有找到 .tcl 脚本文件");
        return Ok(());
    }

    let mut errors = 0usize;
    for file in &files {
        let text = std::fs::read_to_string(file)?;
        match Script::parse(&text) {
            Ok(script) => {
                eprintln!("  ok    {} ({} 条语句)", file.display(), script.len());
            }
            Err(e) => {
                errors += 1;
                eprintln!("  ERROR {}: {e}", file.display());
            }
        }
    }

    eprintln!("\n检查了 {} 个脚本，{} 个错误", files.len(), errors);
    if errors > 0 {
        anyhow::bail!("script-check 发现 {errors} 个错误");
    }
    Ok(())
}

/// 收集目录下全部 .tcl 文件
fn collect_scripts(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "tcl"))
        .map(|e| e.into_path())
        .collect()
}

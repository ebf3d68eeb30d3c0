//! # host-cli
//!
//! 命令行宿主：读取脚本文件，运行解释器，打印输出与返回值。
//!
//! ## 用法
//!
//! ```bash
//! cargo run -p host-cli -- script.tcl
//! cargo run -p host-cli -- script.tcl --result
//! ```

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context as _;
use clap::Parser;
use tcl_runtime::{Interpreter, TclInterpreter};

#[derive(Parser)]
#[command(name = "tclrun")]
#[command(about = "Tcl 风格脚本解释器命令行宿主")]
#[command(version)]
struct Cli {
    /// 脚本文件路径
    script: PathBuf,

    /// 同时打印脚本的返回值
    #[arg(short, long)]
    result: bool,
}

fn main() -> ExitCode {
    if let Err(e) = real_main() {
        eprintln!("host-cli error: {e:#}");
        return ExitCode::from(1);
    }
    ExitCode::from(0)
}

fn real_main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let text = fs::read_to_string(&cli.script)
        .with_context(|| format!("无法读取脚本文件 {}", cli.script.display()))?;

    let mut interpreter = TclInterpreter::from_source(&text);
    match interpreter.run() {
        Ok(value) => {
            print!("{}", interpreter.output());
            if cli.result {
                println!("=> {value}");
            }
            Ok(())
        }
        Err(e) => {
            // 失败前已产生的输出照常打印
            print!("{}", interpreter.output());
            anyhow::bail!("脚本执行失败: {e}")
        }
    }
}

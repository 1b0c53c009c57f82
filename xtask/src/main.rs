// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Workspace developer tasks, run as `cargo run -p x -- <task>`.

use std::process::{Command, ExitCode};

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "x", about = "Developer tasks for the datasketches workspace")]
struct Cli {
    #[command(subcommand)]
    task: Task,
}

#[derive(Subcommand)]
enum Task {
    /// Run `cargo fmt --check` over the whole workspace.
    Fmt,
    /// Run `cargo clippy` with the workspace lint set over every member.
    Clippy,
    /// Run the full test suite for every workspace member.
    Test,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let result = match cli.task {
        Task::Fmt => run("cargo", &["fmt", "--all", "--check"]),
        Task::Clippy => run(
            "cargo",
            &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"],
        ),
        Task::Test => run("cargo", &["test", "--workspace"]),
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("x: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(program: &str, args: &[&str]) -> Result<bool, String> {
    let resolved = which::which(program)
        .map_err(|e| format!("could not find `{program}` on PATH: {e}"))?;
    let status = Command::new(resolved)
        .args(args)
        .status()
        .map_err(|e| format!("failed to spawn `{program}`: {e}"))?;
    Ok(status.success())
}

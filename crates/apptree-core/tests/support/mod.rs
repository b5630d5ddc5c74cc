#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::{Cursor, Write};

use apptree_core::client::{App, AppClient, AppFilter, Export, ExportRequest, ImportRequest};
use apptree_core::inputs::{Prompt, Prompter};
use apptree_core::{Error, Result};

/// In-memory admin API.
#[derive(Default)]
pub struct FakeClient {
    pub apps: Vec<App>,
    /// Zip returned by every export
    pub archive: Vec<u8>,
    pub exports: RefCell<Vec<(String, String, ExportRequest)>>,
    pub imports: RefCell<Vec<(String, String, Vec<u8>, ImportRequest)>>,
}

impl FakeClient {
    pub fn new(apps: Vec<App>) -> Self {
        Self {
            apps,
            ..Default::default()
        }
    }

    pub fn with_archive(mut self, archive: Vec<u8>) -> Self {
        self.archive = archive;
        self
    }
}

impl AppClient for FakeClient {
    fn find_apps(&self, filter: &AppFilter) -> Result<Vec<App>> {
        Ok(self
            .apps
            .iter()
            .filter(|app| app.group_id == filter.group_id && app.matches(&filter.app))
            .cloned()
            .collect())
    }

    fn export(&self, group_id: &str, app_id: &str, request: &ExportRequest) -> Result<Export> {
        if !self.apps.iter().any(|a| a.id == app_id) {
            return Err(Error::Remote(anyhow::anyhow!("HTTP 404: app not found")));
        }
        self.exports
            .borrow_mut()
            .push((group_id.to_string(), app_id.to_string(), *request));
        Ok(Export {
            file_name: format!("{}.zip", app_id),
            archive: self.archive.clone(),
        })
    }

    fn import(
        &self,
        group_id: &str,
        app_id: &str,
        archive: &[u8],
        request: &ImportRequest,
    ) -> Result<()> {
        self.imports.borrow_mut().push((
            group_id.to_string(),
            app_id.to_string(),
            archive.to_vec(),
            *request,
        ));
        Ok(())
    }
}

pub fn app(name: &str) -> App {
    App {
        id: format!("{}-id", name),
        group_id: "group-1".to_string(),
        client_app_id: format!("{}-abcde", name),
        name: name.to_string(),
    }
}

/// Answers prompts from a fixed script and records what was asked.
#[derive(Default)]
pub struct Scripted {
    answers: VecDeque<String>,
    pub asked: Vec<String>,
}

impl Scripted {
    pub fn new(answers: &[&str]) -> Self {
        Self {
            answers: answers.iter().map(|a| a.to_string()).collect(),
            asked: Vec::new(),
        }
    }
}

impl Prompter for Scripted {
    fn ask(&mut self, prompt: &Prompt<'_>) -> anyhow::Result<String> {
        self.asked.push(prompt.message().to_string());
        self.answers
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("unexpected prompt: {}", prompt.message()))
    }
}

/// Build a zip archive from `(name, contents)` pairs; names ending in `/`
/// become directory entries.
pub fn zip_of(files: &[(&str, &str)]) -> Vec<u8> {
    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = zip::write::SimpleFileOptions::default();
    for (name, contents) in files {
        if name.ends_with('/') {
            zip.add_directory(*name, options).unwrap();
        } else {
            zip.start_file(*name, options).unwrap();
            zip.write_all(contents.as_bytes()).unwrap();
        }
    }
    zip.finish().unwrap().into_inner()
}

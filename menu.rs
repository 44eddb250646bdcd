/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Menu item tree. Items without a target view are group headers.

use crate::config::MenuItemConfig;
use crate::error::MvpResult;
use crate::navigation::{Navigate, ViewTarget};
use crate::parameters::Parameters;
use crate::registries::ViewRegistry;

#[derive(Debug, Clone, Default)]
pub struct MenuItem {
    caption: String,
    view_name: Option<String>,
    parameters: Parameters,
    children: Vec<MenuItem>,
}

impl MenuItem {
    pub fn group(caption: &str) -> Self {
        Self {
            caption: caption.to_string(),
            ..Self::default()
        }
    }

    pub fn new(caption: &str, view_name: &str, parameters: Parameters) -> Self {
        Self {
            caption: caption.to_string(),
            view_name: Some(view_name.to_string()),
            parameters,
            children: Vec::new(),
        }
    }

    pub fn with_child(mut self, child: MenuItem) -> Self {
        self.children.push(child);
        self
    }

    pub fn caption(&self) -> &str {
        &self.caption
    }

    pub fn view_name(&self) -> Option<&str> {
        self.view_name.as_deref()
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub fn children(&self) -> &[MenuItem] {
        &self.children
    }

    pub fn is_group(&self) -> bool {
        self.view_name.is_none()
    }

    /// Opens the target view with this item's parameters. Returns `false`
    /// for group headers.
    pub fn activate(&self, navigator: &dyn Navigate) -> MvpResult<bool> {
        let Some(view_name) = &self.view_name else {
            return Ok(false);
        };
        navigator.open_view(
            ViewTarget::Name(view_name.clone()),
            None,
            self.parameters.clone(),
        )?;
        Ok(true)
    }

    fn from_config(config: &MenuItemConfig) -> Self {
        Self {
            caption: config.caption.clone(),
            view_name: config.view.clone(),
            parameters: config.navigation_parameters(),
            children: config.children.iter().map(Self::from_config).collect(),
        }
    }

    fn collect_leaves<'a>(&'a self, leaves: &mut Vec<&'a MenuItem>) {
        if self.children.is_empty() {
            leaves.push(self);
        }
        for child in &self.children {
            child.collect_leaves(leaves);
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Menu {
    items: Vec<MenuItem>,
}

impl Menu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(items: &[MenuItemConfig]) -> Self {
        Self {
            items: items.iter().map(MenuItem::from_config).collect(),
        }
    }

    pub fn push(&mut self, item: MenuItem) {
        self.items.push(item);
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items without children, depth first.
    pub fn leaves(&self) -> Vec<&MenuItem> {
        let mut leaves = Vec::new();
        for item in &self.items {
            item.collect_leaves(&mut leaves);
        }
        leaves
    }

    /// Follows captions from the top level down.
    pub fn find(&self, path: &[&str]) -> Option<&MenuItem> {
        let (first, rest) = path.split_first()?;
        let mut current = self.items.iter().find(|item| item.caption == *first)?;
        for caption in rest {
            current = current.children.iter().find(|item| item.caption == *caption)?;
        }
        Some(current)
    }

    /// Leaves that target a view name the registry does not know.
    pub fn unresolved(&self, registry: &ViewRegistry) -> Vec<&MenuItem> {
        self.leaves()
            .into_iter()
            .filter(|item| {
                item.view_name()
                    .is_some_and(|name| !registry.contains(name))
            })
            .collect()
    }
}

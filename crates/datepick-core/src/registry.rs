/// One picker per host element. Attaching twice to the same host is refused;
/// the page-wide events are fanned out to whichever pickers are listening.
use crate::exceptions::PickerError;
use crate::host::HostField;
use crate::listeners::{ListenerKind, ListenerRegistry};
use crate::options::PickerOptions;
use crate::picker::{Anchor, DatePicker, PickerEvent, Placement};
use log::info;
use std::collections::BTreeMap;

#[derive(Debug, Default)]
pub struct PickerRegistry {
    pickers: BTreeMap<String, DatePicker>,
    listeners: ListenerRegistry,
}

impl PickerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn listeners(&self) -> &ListenerRegistry {
        &self.listeners
    }

    pub fn attach(
        &mut self,
        id: &str,
        host: Box<dyn HostField>,
        options: PickerOptions,
    ) -> Result<&mut DatePicker, PickerError> {
        if self.pickers.contains_key(id) {
            return Err(PickerError::DuplicateHost(id.to_string()));
        }
        let picker = DatePicker::new(id, host, options, self.listeners.clone())?;
        info!("Attached picker to {}", id);
        Ok(self.pickers.entry(id.to_string()).or_insert(picker))
    }

    /// Destroy the picker bound to `id` and return the host's final value
    pub fn detach(&mut self, id: &str) -> Result<String, PickerError> {
        let picker = self
            .pickers
            .remove(id)
            .ok_or_else(|| PickerError::UnknownHost(id.to_string()))?;
        let value = picker.host().value();
        picker.destroy();
        info!("Detached picker from {}", id);
        Ok(value)
    }

    pub fn get(&self, id: &str) -> Option<&DatePicker> {
        self.pickers.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut DatePicker> {
        self.pickers.get_mut(id)
    }

    pub fn ids(&self) -> Vec<String> {
        self.pickers.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.pickers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pickers.is_empty()
    }

    /// A click anywhere outside the popups. `on_host` names the host element
    /// that was clicked, if any, so its own picker stays open.
    pub fn outside_click(&mut self, on_host: Option<&str>) -> Vec<(String, PickerEvent)> {
        let mut events = Vec::new();
        for id in self.listeners.listening(ListenerKind::OutsideClick) {
            if let Some(picker) = self.pickers.get_mut(&id) {
                let clicked_host = on_host == Some(id.as_str());
                events.extend(
                    picker
                        .outside_click(clicked_host)
                        .into_iter()
                        .map(|e| (id.clone(), e)),
                );
            }
        }
        events
    }

    /// Re-place every open popup. `anchor_of` returns the current rectangle of
    /// a host element.
    pub fn resize<F>(&mut self, anchor_of: F) -> Vec<(String, Placement)>
    where
        F: Fn(&str) -> Option<Anchor>,
    {
        let mut placements = Vec::new();
        for id in self.listeners.listening(ListenerKind::Resize) {
            let Some(anchor) = anchor_of(&id) else {
                continue;
            };
            if let Some(placement) = self.pickers.get_mut(&id).and_then(|p| p.place(anchor)) {
                placements.push((id, placement));
            }
        }
        placements
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::TextInput;

    fn registry() -> PickerRegistry {
        let mut registry = PickerRegistry::new();
        registry
            .attach(
                "checkin",
                Box::new(TextInput::new("02/15/2024")),
                PickerOptions::default(),
            )
            .unwrap();
        registry
            .attach(
                "checkout",
                Box::new(TextInput::new("02/18/2024")),
                PickerOptions::default(),
            )
            .unwrap();
        registry
    }

    #[test]
    fn test_attach_twice_is_refused() {
        let mut registry = registry();
        let err = registry
            .attach("checkin", Box::new(TextInput::new("")), PickerOptions::default())
            .unwrap_err();
        assert_eq!(err, PickerError::DuplicateHost("checkin".to_string()));
        assert_eq!(registry.ids(), vec!["checkin", "checkout"]);
    }

    #[test]
    fn test_attach_with_bad_options_leaves_nothing_behind() {
        let mut registry = PickerRegistry::new();
        let result = registry.attach(
            "bad",
            Box::new(TextInput::new("")),
            PickerOptions::default().week_start(9),
        );
        assert!(result.is_err());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_detach_releases_listeners() {
        let mut registry = registry();
        registry.get_mut("checkin").unwrap().show();
        assert_eq!(registry.listeners().len(), 1);

        assert_eq!(registry.detach("checkin").unwrap(), "02/15/2024");
        assert!(registry.listeners().is_empty());
        assert!(registry.get("checkin").is_none());
        assert_eq!(
            registry.detach("checkin").unwrap_err(),
            PickerError::UnknownHost("checkin".to_string())
        );
    }

    #[test]
    fn test_outside_click_only_reaches_open_pickers() {
        let mut registry = registry();
        registry.get_mut("checkin").unwrap().show();
        registry.get_mut("checkout").unwrap().show();

        let events = registry.outside_click(Some("checkout"));
        assert_eq!(events, vec![("checkin".to_string(), PickerEvent::Hide)]);
        assert!(!registry.get("checkin").unwrap().is_visible());
        assert!(registry.get("checkout").unwrap().is_visible());

        let events = registry.outside_click(None);
        assert_eq!(events, vec![("checkout".to_string(), PickerEvent::Hide)]);
        assert!(registry.outside_click(None).is_empty());
    }

    #[test]
    fn test_resize_places_open_pickers() {
        let mut registry = registry();
        registry.get_mut("checkout").unwrap().show();
        let placements = registry.resize(|id| {
            (id == "checkout").then_some(Anchor {
                x: 2,
                y: 5,
                width: 12,
                height: 1,
            })
        });
        assert_eq!(placements.len(), 1);
        assert_eq!(placements[0].0, "checkout");
        assert_eq!(placements[0].1.top, 6);
        assert_eq!(registry.get("checkout").unwrap().placement(), Some(placements[0].1));
    }
}

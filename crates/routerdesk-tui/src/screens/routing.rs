//! Routing screen: protocol processes, static routes, OSPF areas and BGP
//! neighbors.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::widgets::{Cell, Paragraph, Row};
use strum::IntoEnumIterator;

use routerdesk_core::{
    BgpNeighbor, Command, OspfArea, RoutingProtocol, RoutingProtocols,
    StaticRoute, UpdateProtocolRequest,
};

use crate::action::{Action, FormRequest, RecordKind};
use crate::component::Component;
use crate::console_bridge::RouterConsole;
use crate::screens::{FilterText, first_cell, record_keys, render_table};
use crate::theme;
use crate::widgets::table_nav::TableNav;
use crate::widgets::{panel, status, sub_tabs};

const TABS: &[&str] = &["Protocols", "Static", "OSPF", "BGP"];
const PROTOCOLS: usize = 0;
const STATIC: usize = 1;
const OSPF: usize = 2;
const BGP: usize = 3;

/// One-line parameter summary for a protocol process.
fn protocol_params(protocols: &RoutingProtocols, protocol: RoutingProtocol) -> String {
    match protocol {
        RoutingProtocol::Ospf => format!(
            "process {}  router-id {}",
            protocols.ospf.process_id, protocols.ospf.router_id
        ),
        RoutingProtocol::Eigrp => format!("AS {}", protocols.eigrp.asn),
        RoutingProtocol::Bgp => format!(
            "AS {}  router-id {}",
            protocols.bgp.asn, protocols.bgp.router_id
        ),
        RoutingProtocol::Rip => format!("version {}", protocols.rip.version),
    }
}

pub struct RoutingScreen {
    focused: bool,
    tab: usize,
    navs: [TableNav; 4],
    filter: FilterText,
}

impl RoutingScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            tab: PROTOCOLS,
            navs: Default::default(),
            filter: FilterText::default(),
        }
    }

    fn static_routes<'a>(&self, console: &'a RouterConsole) -> Vec<&'a StaticRoute> {
        self.filter.filter().apply(console.routing().static_routes.iter())
    }

    fn ospf_areas<'a>(&self, console: &'a RouterConsole) -> Vec<&'a OspfArea> {
        self.filter.filter().apply(console.routing().ospf_areas.iter())
    }

    fn bgp_neighbors<'a>(&self, console: &'a RouterConsole) -> Vec<&'a BgpNeighbor> {
        self.filter.filter().apply(console.routing().bgp_neighbors.iter())
    }

    fn protocols_key(&mut self, key: KeyEvent, console: &RouterConsole) -> Option<Action> {
        let all: Vec<RoutingProtocol> = RoutingProtocol::iter().collect();
        let nav = &mut self.navs[PROTOCOLS];
        if nav.handle_key(key, all.len()) {
            return None;
        }
        let protocol = *nav.selected(all.len()).and_then(|i| all.get(i))?;
        match key.code {
            KeyCode::Char('e') | KeyCode::Enter => {
                Some(Action::OpenForm(FormRequest::Protocol(protocol)))
            }
            KeyCode::Char(' ') => {
                let mut update = UpdateProtocolRequest::new(protocol);
                update.enabled = Some(!console.routing().protocols.is_enabled(protocol));
                Some(Action::Execute(Command::UpdateProtocol(update)))
            }
            _ => None,
        }
    }

    fn render_protocols(&self, frame: &mut Frame, area: Rect, console: &RouterConsole) {
        let protocols = &console.routing().protocols;
        let selected = self.navs[PROTOCOLS].selected(4);
        let rows = RoutingProtocol::iter()
            .enumerate()
            .map(|(i, p)| {
                Row::new(vec![
                    first_cell(selected == Some(i), p.to_string().to_uppercase()),
                    Cell::from(status::flag(protocols.is_enabled(p))),
                    Cell::from(protocol_params(protocols, p)).style(theme::value()),
                ])
            })
            .collect();
        render_table(
            frame,
            area,
            panel(" Routing Protocols ".to_owned(), self.focused),
            &["Protocol", "State", "Parameters"],
            &[Constraint::Length(12), Constraint::Length(8), Constraint::Min(20)],
            rows,
            &self.navs[PROTOCOLS],
        );
    }

    fn render_static(&self, frame: &mut Frame, area: Rect, console: &RouterConsole) {
        let routes = self.static_routes(console);
        let selected = self.navs[STATIC].selected(routes.len());
        let rows = routes
            .iter()
            .enumerate()
            .map(|(i, r)| {
                let network = if r.is_default_route() {
                    format!("{} (default)", r.network)
                } else {
                    r.network.clone()
                };
                Row::new(vec![
                    first_cell(selected == Some(i), network),
                    Cell::from(r.mask.clone()),
                    Cell::from(r.next_hop().to_owned()),
                    Cell::from(r.distance.to_string()),
                    Cell::from(r.description.clone()).style(theme::label()),
                ])
            })
            .collect();
        let total = console.routing().static_routes.len();
        render_table(
            frame,
            area,
            panel(
                format!(" Static Routes{} ", self.filter.count_suffix(routes.len(), total)),
                self.focused,
            ),
            &["Network", "Mask", "Next hop", "AD", "Description"],
            &[
                Constraint::Length(22),
                Constraint::Length(16),
                Constraint::Length(22),
                Constraint::Length(4),
                Constraint::Min(12),
            ],
            rows,
            &self.navs[STATIC],
        );
    }

    fn render_ospf(&self, frame: &mut Frame, area: Rect, console: &RouterConsole) {
        let areas = self.ospf_areas(console);
        let selected = self.navs[OSPF].selected(areas.len());
        let rows = areas
            .iter()
            .enumerate()
            .map(|(i, a)| {
                Row::new(vec![
                    first_cell(selected == Some(i), a.area_id.clone()),
                    Cell::from(a.kind.to_string()),
                    Cell::from(a.networks.join(", ")),
                ])
            })
            .collect();
        let total = console.routing().ospf_areas.len();
        render_table(
            frame,
            area,
            panel(
                format!(" OSPF Areas{} ", self.filter.count_suffix(areas.len(), total)),
                self.focused,
            ),
            &["Area", "Type", "Networks"],
            &[Constraint::Length(12), Constraint::Length(10), Constraint::Min(20)],
            rows,
            &self.navs[OSPF],
        );
    }

    fn render_bgp(&self, frame: &mut Frame, area: Rect, console: &RouterConsole) {
        let neighbors = self.bgp_neighbors(console);
        let selected = self.navs[BGP].selected(neighbors.len());
        let rows = neighbors
            .iter()
            .enumerate()
            .map(|(i, n)| {
                Row::new(vec![
                    first_cell(selected == Some(i), n.ip.clone()),
                    Cell::from(n.remote_as.to_string()),
                    Cell::from(n.description.clone()).style(theme::label()),
                ])
            })
            .collect();
        let total = console.routing().bgp_neighbors.len();
        let local_as = console.routing().protocols.bgp.asn;
        render_table(
            frame,
            area,
            panel(
                format!(
                    " BGP Neighbors{}  local AS {local_as} ",
                    self.filter.count_suffix(neighbors.len(), total)
                ),
                self.focused,
            ),
            &["Neighbor", "Remote AS", "Description"],
            &[Constraint::Length(18), Constraint::Length(10), Constraint::Min(12)],
            rows,
            &self.navs[BGP],
        );
    }
}

impl Component for RoutingScreen {
    fn handle_key_event(
        &mut self,
        key: KeyEvent,
        console: &RouterConsole,
    ) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Char(']') => {
                self.tab = sub_tabs::cycle(self.tab, TABS.len(), true);
                return Ok(None);
            }
            KeyCode::Char('[') => {
                self.tab = sub_tabs::cycle(self.tab, TABS.len(), false);
                return Ok(None);
            }
            _ => {}
        }

        let action = match self.tab {
            PROTOCOLS => self.protocols_key(key, console),
            STATIC => {
                let rows = self.static_routes(console);
                record_keys(
                    &mut self.navs[STATIC],
                    key,
                    &rows,
                    RecordKind::StaticRoute,
                    Some(|id| Command::DeleteStaticRoute { id }),
                )
            }
            OSPF => {
                let rows = self.ospf_areas(console);
                record_keys(
                    &mut self.navs[OSPF],
                    key,
                    &rows,
                    RecordKind::OspfArea,
                    Some(|id| Command::DeleteOspfArea { id }),
                )
            }
            _ => {
                let rows = self.bgp_neighbors(console);
                record_keys(
                    &mut self.navs[BGP],
                    key,
                    &rows,
                    RecordKind::BgpNeighbor,
                    Some(|id| Command::DeleteBgpNeighbor { id }),
                )
            }
        };
        Ok(action)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if self.filter.update(action) {
            for nav in &mut self.navs[STATIC..] {
                nav.reset();
            }
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect, console: &RouterConsole) {
        let [tabs_area, body] =
            Layout::vertical([Constraint::Length(1), Constraint::Min(3)]).areas(area);
        frame.render_widget(Paragraph::new(sub_tabs::render_sub_tabs(TABS, self.tab)), tabs_area);
        match self.tab {
            PROTOCOLS => self.render_protocols(frame, body, console),
            STATIC => self.render_static(frame, body, console),
            OSPF => self.render_ospf(frame, body, console),
            _ => self.render_bgp(frame, body, console),
        }
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn hints(&self) -> &'static [(&'static str, &'static str)] {
        if self.tab == PROTOCOLS {
            &[("space", "on/off"), ("e", "edit"), ("[ ]", "tabs"), ("p", "preview")]
        } else {
            &[("n", "new"), ("e", "edit"), ("d", "delete"), ("[ ]", "tabs")]
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::screens::test_support::{console, key, render_text};

    #[test]
    fn space_flips_selected_protocol() {
        let console = console();
        let mut screen = RoutingScreen::new();
        // OSPF, EIGRP, BGP
        screen.handle_key_event(key('j'), &console).unwrap();
        screen.handle_key_event(key('j'), &console).unwrap();
        let action = screen.handle_key_event(key(' '), &console).unwrap();
        match action {
            Some(Action::Execute(Command::UpdateProtocol(update))) => {
                assert_eq!(update.protocol, RoutingProtocol::Bgp);
                assert_eq!(
                    update.enabled,
                    Some(!console.routing().protocols.bgp.enabled)
                );
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn static_tab_deletes_with_confirm() {
        let console = console();
        let mut screen = RoutingScreen::new();
        screen.handle_key_event(key(']'), &console).unwrap();
        let action = screen.handle_key_event(key('d'), &console).unwrap();
        match action {
            Some(Action::ShowConfirm(pending)) => {
                assert!(matches!(pending.command, Command::DeleteStaticRoute { .. }));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn bgp_tab_renders_local_as() {
        let console = console();
        let mut screen = RoutingScreen::new();
        screen.handle_key_event(key('['), &console).unwrap();
        assert_eq!(screen.tab, BGP);
        let text = render_text(&screen, &console);
        assert!(text.contains("local AS 65001"));
    }
}

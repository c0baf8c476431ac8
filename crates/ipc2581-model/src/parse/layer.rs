use super::Parser;
use crate::diagnostics::Diagnostic;
use crate::tree::Element;
use crate::types::*;
use crate::{Ipc2581Error, Result};

/// Features gathered from one Set before they are filed under a net
#[derive(Default)]
struct SetFeatures {
    locations: Vec<Point>,
    features: Vec<Feature>,
    transform: Option<Transform>,
}

impl SetFeatures {
    fn push(&mut self, location: Point, feature: Feature) {
        self.locations.push(location);
        self.features.push(feature);
    }
}

impl Parser<'_> {
    /// Builds one layer: declaration, stackup, classified Sets, physical net
    /// points and placed components.
    pub(super) fn parse_layer(
        &mut self,
        cad_data: Option<Element<'_, '_>>,
        step: Option<Element<'_, '_>>,
        name: &str,
    ) -> Result<Layer> {
        let record = cad_data
            .and_then(|cd| {
                cd.children_named("Layer")
                    .find(|l| l.attr("name") == Some(name))
            })
            .ok_or_else(|| Ipc2581Error::MissingLayerRecord(name.to_string()))?;

        let function = self
            .enumerated(record, "layerFunction", "layer function")
            .unwrap_or(LayerFunction::Other);
        let mut layer = Layer::new(name, function);
        layer.side = self.enumerated(record, "side", "side");
        layer.polarity = self.enumerated(record, "polarity", "polarity");

        self.apply_stackup(&mut layer, cad_data);

        let Some(step) = step else {
            return Ok(layer);
        };

        for feature in step
            .children_named("LayerFeature")
            .filter(|lf| lf.attr("layerRef") == Some(name))
        {
            for set in feature.children_named("Set") {
                self.classify_set(&mut layer, set)?;
            }
        }

        for group in step.children_named("PhyNetGroup") {
            for net in group.children_named("PhyNet") {
                let net_name = net.attr("name").unwrap_or_default();
                for point in net
                    .children_named("PhyNetPoint")
                    .filter(|p| p.attr("layerRef") == Some(name))
                {
                    let point = self.load_phy_net_point(point, net_name);
                    layer.phy_net_points.push(point);
                }
            }
        }

        for component in step
            .children_named("Component")
            .filter(|c| c.attr("layerRef") == Some(name))
        {
            let placement = self.load_component(component)?;
            layer.components.push(placement);
        }

        Ok(layer)
    }

    fn apply_stackup(&mut self, layer: &mut Layer, cad_data: Option<Element<'_, '_>>) {
        let stackup_layer = cad_data.and_then(|cd| {
            cd.children_named("Stackup")
                .flat_map(|s| s.children_named("StackupGroup"))
                .flat_map(|g| g.children_named("StackupLayer"))
                .find(|sl| sl.attr("layerOrGroupRef") == Some(layer.name.as_str()))
        });

        let Some(sl) = stackup_layer else {
            self.report(Diagnostic::MissingStackup {
                layer: layer.name.clone(),
            });
            return;
        };

        layer.in_stackup = true;
        layer.thickness = self.float_or_zero(sl, "thickness");
        layer.tol_plus = self.float(sl, "tolPlus").unwrap_or(0.0);
        layer.tol_minus = self.float(sl, "tolMinus").unwrap_or(0.0);
        layer.sequence = self
            .enumerated(sl, "sequence", "unsigned integer")
            .unwrap_or(0);
    }

    /// Files one Set under the layer.
    ///
    /// Precedence: net with padUsage VIA or NONE, then net with geometry
    /// (skipped), then net alone (appended to the named net), then no net.
    fn classify_set(&mut self, layer: &mut Layer, set: Element<'_, '_>) -> Result<()> {
        let net = set.attr("net");

        if let Some(net) = net {
            match set.attr("padUsage") {
                Some("VIA") => {
                    let via = self.load_pad_set(set, net)?;
                    layer.vias.push(via);
                    return Ok(());
                }
                Some("NONE") => {
                    let unused = self.load_pad_set(set, net)?;
                    layer.pads_not_used.push(unused);
                    return Ok(());
                }
                _ => {}
            }

            if let Some(geometry) = set.attr("geometry") {
                layer.unmodeled_nets.push(net.to_string());
                self.report(Diagnostic::UnmodeledSet {
                    layer: layer.name.clone(),
                    net: net.to_string(),
                    geometry: geometry.to_string(),
                });
                return Ok(());
            }
        }

        let group = self.load_set_features(set)?;
        match net {
            Some(net) => {
                let entry = layer.net_entry(net);
                entry.feature_locations.extend(group.locations);
                entry.features.extend(group.features);
                if group.transform.is_some() {
                    entry.transform = group.transform;
                }
            }
            None => layer.no_net.push(NoNetGeometry {
                feature_locations: group.locations,
                features: group.features,
                transform: group.transform,
                polarity: self.enumerated(set, "polarity", "polarity"),
            }),
        }
        Ok(())
    }

    fn load_pad_set(&mut self, set: Element<'_, '_>, net: &str) -> Result<PadSet> {
        Ok(PadSet {
            net: net.to_string(),
            pad: set.child("Pad").map(|p| self.load_pad(p)).transpose()?,
            nonstandard_attributes: self.nonstandard_attributes(set),
            plate: self.boolean(set, "plate").unwrap_or(false),
            test_point: self.boolean(set, "testPoint").unwrap_or(false),
        })
    }

    fn load_set_features(&mut self, set: Element<'_, '_>) -> Result<SetFeatures> {
        let mut group = SetFeatures::default();

        for child in set.children() {
            if child.is("Features") {
                let location = self.location(child);
                let mut placed = false;
                for item in child.children() {
                    if item.is("Location") {
                        continue;
                    }
                    if item.is("Xform") {
                        group.transform = Some(self.load_transform(item, Transform::default())?);
                        continue;
                    }
                    let feature = if item.is("UserSpecial") {
                        Feature::Special(self.load_user_special(item)?)
                    } else if item.is("StandardPrimitiveRef") {
                        match self.primitive_ref_id(item) {
                            Some(id) => Feature::StandardRef(id),
                            None => continue,
                        }
                    } else if item.is("UserPrimitiveRef") {
                        match self.primitive_ref_id(item) {
                            Some(id) => Feature::UserRef(id),
                            None => continue,
                        }
                    } else {
                        Feature::Primitive(self.parse_primitive(item)?)
                    };
                    group.push(location, feature);
                    placed = true;
                }
                if !placed {
                    group.push(location, Feature::Location(location));
                }
            } else if child.is("Pad") {
                let pad = self.load_pad(child)?;
                group.push(pad.location, Feature::Pad(pad));
            } else {
                log::debug!("skipping <{}> in Set", child.tag());
            }
        }

        Ok(group)
    }

    fn primitive_ref_id(&mut self, el: Element<'_, '_>) -> Option<String> {
        let id = self.text(el, "id");
        if id.is_none() {
            self.missing_attribute(el, "id");
        }
        id
    }

    /// `Pad` element, in a Set or a package land pattern
    pub(super) fn load_pad(&mut self, el: Element<'_, '_>) -> Result<Pad> {
        self.expect_tag(el, "Pad")?;
        let pin_ref = match el.child("PinRef") {
            Some(pr) => match pr.attr("pin") {
                Some(pin) => Some(PinRef {
                    component_ref: self.text(pr, "componentRef"),
                    pin: pin.to_string(),
                }),
                None => {
                    self.missing_attribute(pr, "pin");
                    None
                }
            },
            None => None,
        };

        Ok(Pad {
            padstack_def_ref: self.text(el, "padstackDefRef"),
            location: self.location(el),
            transform: self.child_transform(el)?,
            standard_primitive_ref: self.child_ref(el, "StandardPrimitiveRef"),
            user_primitive_ref: self.child_ref(el, "UserPrimitiveRef"),
            pin_ref,
        })
    }

    fn load_phy_net_point(&mut self, el: Element<'_, '_>, net: &str) -> PhysicalNetPoint {
        PhysicalNetPoint {
            net: net.to_string(),
            layer_ref: self.text_or_empty(el, "layerRef"),
            position: self.point(el, "x", "y"),
            net_node: self.enumerated(el, "netNode", "net node"),
            exposure: self.enumerated(el, "exposure", "exposure"),
            via: self.boolean(el, "via").unwrap_or(false),
            standard_primitive_ref: self.child_ref(el, "StandardPrimitiveRef"),
        }
    }

    fn load_component(&mut self, el: Element<'_, '_>) -> Result<ComponentPlacement> {
        Ok(ComponentPlacement {
            ref_des: self.text_or_empty(el, "refDes"),
            package_ref: self.text(el, "packageRef"),
            layer_ref: self.text_or_empty(el, "layerRef"),
            part: self.text(el, "part"),
            mount_type: self.enumerated(el, "mountType", "mount type"),
            standoff: self.float(el, "standoff"),
            height: self.float(el, "height"),
            location: self.location(el),
            transform: self.child_transform(el)?,
            nonstandard_attributes: self.nonstandard_attributes(el),
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::parse::test_support::with_parser;
    use crate::types::*;
    use crate::{Diagnostic, Ipc2581Error};

    fn cad_data(layers: &str, sets: &str) -> String {
        format!(
            r#"<CadData>
                {layers}
                <Stackup name="S"><StackupGroup name="G">
                    <StackupLayer layerOrGroupRef="TOP" thickness="0.035" sequence="1"/>
                </StackupGroup></Stackup>
                <Step name="board">{sets}</Step>
            </CadData>"#
        )
    }

    fn build(xml: &str, name: &str) -> (Result<Layer, Ipc2581Error>, Vec<Diagnostic>) {
        with_parser(xml, |parser, el| {
            let layer = parser.parse_layer(Some(el), el.child("Step"), name);
            (layer, parser.diagnostics().iter().cloned().collect())
        })
    }

    #[test]
    fn transform_rotation_keeps_default() {
        let xml = cad_data(
            r#"<Layer name="TOP" layerFunction="SIGNAL" side="TOP" polarity="POSITIVE"/>"#,
            r#"<LayerFeature layerRef="TOP">
                <Set net="VCC">
                    <Features>
                        <Xform xOffset="1.0" mirror="true"/>
                        <Location x="0" y="0"/>
                        <Circle diameter="0.5"/>
                    </Features>
                </Set>
            </LayerFeature>"#,
        );
        let (layer, _) = build(&xml, "TOP");
        let layer = layer.unwrap();
        let transform = layer.net("VCC").unwrap().transform.unwrap();
        assert_eq!(transform.x_offset, 1.0);
        assert!(transform.mirror);
        assert_eq!(transform.rotation, 0.0);
    }

    #[test]
    fn geometry_set_is_skipped_with_diagnostic() {
        let xml = cad_data(
            r#"<Layer name="TOP" layerFunction="SIGNAL"/>"#,
            r#"<LayerFeature layerRef="TOP">
                <Set net="GND" geometry="VIA_0.3">
                    <Features><Location x="1" y="1"/><Circle diameter="0.3"/></Features>
                </Set>
            </LayerFeature>"#,
        );
        let (layer, diagnostics) = build(&xml, "TOP");
        let layer = layer.unwrap();
        assert!(layer.nets.is_empty());
        assert!(layer.no_net.is_empty());
        assert_eq!(layer.unmodeled_nets, vec!["GND".to_string()]);
        assert_eq!(layer.net_names(), vec!["GND"]);
        assert_eq!(
            diagnostics,
            vec![Diagnostic::UnmodeledSet {
                layer: "TOP".into(),
                net: "GND".into(),
                geometry: "VIA_0.3".into(),
            }]
        );
    }

    #[test]
    fn other_pad_usage_falls_through_to_net() {
        let xml = cad_data(
            r#"<Layer name="TOP" layerFunction="SIGNAL"/>"#,
            r#"<LayerFeature layerRef="TOP">
                <Set net="SIG" padUsage="TERMINATION">
                    <Pad padstackDefRef="PS1">
                        <Location x="2" y="3"/>
                        <StandardPrimitiveRef id="RECT1"/>
                        <PinRef componentRef="R1" pin="1"/>
                    </Pad>
                </Set>
            </LayerFeature>"#,
        );
        let (layer, _) = build(&xml, "TOP");
        let layer = layer.unwrap();
        assert!(layer.vias.is_empty());
        let sig = layer.net("SIG").unwrap();
        assert_eq!(sig.feature_locations, vec![Point::new(2.0, 3.0)]);
        match &sig.features[0] {
            Feature::Pad(pad) => {
                assert_eq!(pad.standard_primitive_ref.as_deref(), Some("RECT1"));
                assert_eq!(pad.pin_ref.as_ref().map(|p| p.pin.as_str()), Some("1"));
            }
            other => panic!("expected pad, got {:?}", other),
        }
    }

    #[test]
    fn missing_stackup_defaults_to_zero() {
        let xml = cad_data(r#"<Layer name="SILK" layerFunction="SILKSCREEN"/>"#, "");
        let (layer, diagnostics) = build(&xml, "SILK");
        let layer = layer.unwrap();
        assert!(!layer.in_stackup);
        assert_eq!(layer.thickness, 0.0);
        assert_eq!(layer.sequence, 0);
        assert_eq!(
            diagnostics,
            vec![Diagnostic::MissingStackup {
                layer: "SILK".into()
            }]
        );
    }

    #[test]
    fn missing_layer_record_is_fatal() {
        let xml = cad_data(r#"<Layer name="TOP" layerFunction="SIGNAL"/>"#, "");
        let (layer, _) = build(&xml, "INNER1");
        assert!(matches!(
            layer,
            Err(Ipc2581Error::MissingLayerRecord(name)) if name == "INNER1"
        ));
    }

    #[test]
    fn holes_and_slots_are_not_modeled() {
        let xml = cad_data(
            r#"<Layer name="TOP" layerFunction="SIGNAL"/>"#,
            r#"<LayerFeature layerRef="TOP">
                <Set net="GND">
                    <Hole name="H1" diameter="0.3" platingStatus="PLATED" x="0" y="0"/>
                    <SlotCavity name="S1" platingStatus="NONPLATED"/>
                    <Features><Location x="5" y="5"/><StandardPrimitiveRef id="PAD"/></Features>
                </Set>
            </LayerFeature>"#,
        );
        let (layer, diagnostics) = build(&xml, "TOP");
        let gnd = layer.unwrap().nets.swap_remove("GND").unwrap();
        assert_eq!(gnd.features, vec![Feature::StandardRef("PAD".into())]);
        assert!(diagnostics.is_empty());
    }
}

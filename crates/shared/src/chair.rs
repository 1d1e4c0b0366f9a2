use crate::{Category, MaterialSpec, PartSpec, ProductCatalog, Shape};

const SEAT_HEIGHT: f32 = 0.9;
const LEG_HEIGHT: f32 = 0.86;
const LEG_INSET: f32 = 0.42;

fn wood() -> MaterialSpec {
    MaterialSpec::new([0.55, 0.36, 0.2]).with_roughness(0.7)
}

fn fabric() -> MaterialSpec {
    MaterialSpec::new([0.18, 0.28, 0.48]).with_roughness(0.95)
}

fn steel() -> MaterialSpec {
    MaterialSpec::new([0.7, 0.7, 0.72])
        .with_metalness(0.9)
        .with_roughness(0.3)
}

fn part(
    id: &str,
    name: &str,
    category: Category,
    description: &str,
    shape: Shape,
    material: MaterialSpec,
    position: [f32; 3],
) -> PartSpec {
    PartSpec {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        category,
        shape,
        material,
        position,
    }
}

impl ProductCatalog {
    /// Built-in chair model
    pub fn chair() -> Self {
        let leg_shape = Shape::Cylinder {
            radius: 0.04,
            height: LEG_HEIGHT,
        };
        let leg_y = LEG_HEIGHT * 0.5;
        let legs = [
            ("leg_front_left", "Front left leg", [-LEG_INSET, leg_y, LEG_INSET]),
            ("leg_front_right", "Front right leg", [LEG_INSET, leg_y, LEG_INSET]),
            ("leg_back_left", "Back left leg", [-LEG_INSET, leg_y, -LEG_INSET]),
            ("leg_back_right", "Back right leg", [LEG_INSET, leg_y, -LEG_INSET]),
        ];

        let mut parts = vec![part(
            "seat",
            "Seat",
            Category::Seat,
            "Upholstered seat cushion over a solid oak panel. High-resilience foam keeps its shape after years of daily use.",
            Shape::Box {
                width: 1.0,
                height: 0.08,
                depth: 1.0,
            },
            fabric(),
            [0.0, SEAT_HEIGHT, 0.0],
        )];

        for (id, name, position) in legs {
            parts.push(part(
                id,
                name,
                Category::Leg,
                "Turned solid oak leg, 40 mm diameter, finished with a matte hard-wax oil. Felt pad underneath protects floors.",
                leg_shape.clone(),
                wood(),
                position,
            ));
        }

        parts.push(part(
            "backrest",
            "Backrest",
            Category::Backrest,
            "Curved backrest panel upholstered to match the seat, angled to support the lower back.",
            Shape::Box {
                width: 0.82,
                height: 0.5,
                depth: 0.05,
            },
            fabric(),
            [0.0, 1.45, -0.47],
        ));

        for (id, name, x) in [
            ("post_left", "Left backrest post", -0.44),
            ("post_right", "Right backrest post", 0.44),
        ] {
            parts.push(part(
                id,
                name,
                Category::Frame,
                "Oak post continuing the back leg line, carrying the backrest.",
                Shape::Cylinder {
                    radius: 0.035,
                    height: 0.85,
                },
                wood(),
                [x, 1.37, -0.47],
            ));
        }

        for (id, name, x) in [
            ("armrest_left", "Left armrest", -0.52),
            ("armrest_right", "Right armrest", 0.52),
        ] {
            parts.push(part(
                id,
                name,
                Category::Armrest,
                "Brushed steel armrest with a rounded profile, bolted to the frame at both ends.",
                Shape::Box {
                    width: 0.06,
                    height: 0.05,
                    depth: 0.8,
                },
                steel(),
                [x, 1.2, 0.0],
            ));
        }

        ProductCatalog {
            name: "Oak Lounge Chair".to_string(),
            description: "Solid oak lounge chair with upholstered seat and backrest. Hover a part to inspect it, click to select.".to_string(),
            parts,
        }
    }
}

//! Static category catalog
//!
//! One `CategoryDef` table entry per business category. The table is pure
//! immutable data built at first use and never mutated afterwards; the API
//! registry, schema resolver and orchestrator all dispatch through it, so a
//! new category is one new entry here and nothing else.

use contracts::domain::catalog::{
    CategoryDef, ChildCollectionDef, ConditionalRule, OptionBinding, StepCommit, StepDef,
};
use contracts::shared::metadata::{FieldSpec, InputFormat, ValidationRules};

// ----------------------------------------------------------------------------
// Articulo: the full wizard (primary entity + child collections)
// ----------------------------------------------------------------------------

fn articulo_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::text("nombre", "Nombre")
            .with_validation(ValidationRules {
                required: true,
                max_length: Some(120),
                ..ValidationRules::none()
            }),
        FieldSpec::text("descripcion", "Descripción"),
        FieldSpec::select("idTipoArticulo", "Tipo de artículo", "nombre", "id").required(),
        FieldSpec::text("codigoBarra", "Código de barras"),
        FieldSpec::switch("manejaInventario", "Maneja inventario"),
        FieldSpec::switch("manejaSerial", "Maneja serial"),
        FieldSpec::number("descuento", "Descuento %", InputFormat::Percentage),
        FieldSpec::number("pesoUnitario", "Peso unitario", InputFormat::Decimal),
        FieldSpec::number("puntoReorden", "Punto de reorden", InputFormat::Integer),
    ]
}

const ARTICULO_BINDINGS: &[OptionBinding] = &[OptionBinding {
    field: "idTipoArticulo",
    collection: "tipo_articulo",
}];

const ARTICULO_STEPS: &[StepDef] = &[
    StepDef {
        key: "ficha",
        label: "Ficha",
        fields: &["nombre", "descripcion", "idTipoArticulo", "codigoBarra"],
        commit: StepCommit::Primary,
    },
    StepDef {
        key: "detalles",
        label: "Detalles",
        fields: &[
            "manejaInventario",
            "manejaSerial",
            "descuento",
            "pesoUnitario",
            "puntoReorden",
        ],
        commit: StepCommit::None,
    },
    StepDef {
        key: "presentaciones",
        label: "Presentaciones",
        fields: &[],
        commit: StepCommit::Collection("presentaciones"),
    },
    StepDef {
        key: "precios",
        label: "Precios",
        fields: &[],
        commit: StepCommit::Collection("precios"),
    },
    StepDef {
        key: "ubicaciones",
        label: "Ubicaciones",
        fields: &[],
        commit: StepCommit::Collection("ubicaciones"),
    },
    StepDef {
        key: "fotos",
        label: "Fotos",
        fields: &[],
        commit: StepCommit::Collection("fotos"),
    },
];

const ARTICULO_COLLECTIONS: &[ChildCollectionDef] = &[
    ChildCollectionDef {
        key: "presentaciones",
        label: "Presentaciones",
        endpoint: "/api/articulopresentacion",
        parent_id_field: "idArticulo",
        required_fields: &["idPresentacion", "equivalencia"],
        decimal_fields: &["equivalencia"],
        has_principal: true,
        principal_field: "esPrincipal",
        paced: false,
    },
    ChildCollectionDef {
        key: "precios",
        label: "Listas de precio",
        endpoint: "/api/articulolistadeprecio",
        parent_id_field: "idArticulo",
        required_fields: &["idListasdePrecio", "idMoneda", "monto", "fechaDesde"],
        decimal_fields: &["monto"],
        has_principal: false,
        principal_field: "esPrincipal",
        paced: false,
    },
    ChildCollectionDef {
        key: "ubicaciones",
        label: "Ubicaciones",
        endpoint: "/api/articuloubicacion",
        parent_id_field: "idArticulo",
        required_fields: &["idAlmacen", "idUbicacion"],
        decimal_fields: &[],
        has_principal: false,
        principal_field: "esPrincipal",
        paced: false,
    },
    ChildCollectionDef {
        key: "fotos",
        label: "Fotos",
        endpoint: "/api/articulofoto",
        parent_id_field: "idArticulo",
        required_fields: &["urlFoto"],
        decimal_fields: &[],
        has_principal: true,
        principal_field: "esPrincipal",
        paced: true,
    },
];

// ----------------------------------------------------------------------------
// Figura comercial: single-step category with a conditional rule
// ----------------------------------------------------------------------------

fn figura_comercial_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::text("nombre", "Nombre").required(),
        FieldSpec::text("rif", "RIF"),
        FieldSpec::switch("manejaLimiteCredito", "Maneja límite de crédito"),
        FieldSpec::select("idMonedaLimiteCredito", "Moneda del límite", "nombre", "id"),
        FieldSpec::number("montoLimiteCredito", "Monto del límite", InputFormat::Decimal),
    ]
}

const FIGURA_BINDINGS: &[OptionBinding] = &[OptionBinding {
    field: "idMonedaLimiteCredito",
    collection: "moneda",
}];

const FIGURA_RULES: &[ConditionalRule] = &[ConditionalRule {
    when_switch: "manejaLimiteCredito",
    then_required: &["idMonedaLimiteCredito", "montoLimiteCredito"],
}];

// ----------------------------------------------------------------------------
// Simple single-step categories
// ----------------------------------------------------------------------------

fn banco_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::text("nombre", "Nombre").required(),
        FieldSpec::select("idMoneda", "Moneda", "nombre", "id").required(),
        FieldSpec::text("telefono", "Teléfono"),
    ]
}

const BANCO_BINDINGS: &[OptionBinding] = &[OptionBinding {
    field: "idMoneda",
    collection: "moneda",
}];

fn ciudad_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::text("nombre", "Nombre").required(),
        FieldSpec::select("idRegion", "Región", "nombre", "id").required(),
    ]
}

const CIUDAD_BINDINGS: &[OptionBinding] = &[OptionBinding {
    field: "idRegion",
    collection: "region",
}];

fn moneda_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::text("nombre", "Nombre").required(),
        FieldSpec::text("codigo", "Código"),
        FieldSpec::number("tasaCambio", "Tasa de cambio", InputFormat::Decimal),
    ]
}

fn almacen_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::text("nombre", "Nombre").required(),
        FieldSpec::text("direccion", "Dirección"),
    ]
}

fn named_only_fields() -> Vec<FieldSpec> {
    vec![FieldSpec::text("nombre", "Nombre").required()]
}

/// Single "ficha" tab showing every field of the category
const SINGLE_STEP: &[StepDef] = &[StepDef {
    key: "ficha",
    label: "Ficha",
    fields: &[],
    commit: StepCommit::Primary,
}];

const fn simple(
    key: &'static str,
    label: &'static str,
    endpoint: &'static str,
    fields: fn() -> Vec<FieldSpec>,
    option_bindings: &'static [OptionBinding],
    rules: &'static [ConditionalRule],
) -> CategoryDef {
    CategoryDef {
        key,
        label,
        endpoint,
        fields,
        option_bindings,
        steps: SINGLE_STEP,
        collections: &[],
        rules,
    }
}

/// The full category table
pub fn all() -> &'static [CategoryDef] {
    static CATALOG: &[CategoryDef] = &[
        CategoryDef {
            key: "articulo",
            label: "Artículo",
            endpoint: "/api/articulo",
            fields: articulo_fields,
            option_bindings: ARTICULO_BINDINGS,
            steps: ARTICULO_STEPS,
            collections: ARTICULO_COLLECTIONS,
            rules: &[],
        },
        simple(
            "figura_comercial",
            "Figura comercial",
            "/api/figuracomercial",
            figura_comercial_fields,
            FIGURA_BINDINGS,
            FIGURA_RULES,
        ),
        simple("banco", "Banco", "/api/banco", banco_fields, BANCO_BINDINGS, &[]),
        simple("ciudad", "Ciudad", "/api/ciudad", ciudad_fields, CIUDAD_BINDINGS, &[]),
        simple("moneda", "Moneda", "/api/moneda", moneda_fields, &[], &[]),
        simple("almacen", "Almacén", "/api/almacen", almacen_fields, &[], &[]),
        simple("region", "Región", "/api/region", named_only_fields, &[], &[]),
        simple(
            "lista_precio",
            "Lista de precios",
            "/api/listasdeprecio",
            named_only_fields,
            &[],
            &[],
        ),
        simple(
            "tipo_articulo",
            "Tipo de artículo",
            "/api/tipoarticulo",
            named_only_fields,
            &[],
            &[],
        ),
        simple(
            "presentacion",
            "Presentación",
            "/api/presentacion",
            named_only_fields,
            &[],
            &[],
        ),
    ];
    CATALOG
}

/// Look up a category by key
pub fn find(key: &str) -> Option<&'static CategoryDef> {
    all().iter().find(|def| def.key == key)
}
